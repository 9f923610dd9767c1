//! Invocation builder.

/// An ordered list of logical arguments for one external tool invocation.
///
/// The first argument names the program. Arguments are kept verbatim; quoting
/// is applied only when the invocation is encoded by the executor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Logical arguments, program first.
    pub argv: Vec<String>,
}

impl Invocation {
    /// Create an invocation of `program` with no further arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            argv: vec![program.into()],
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.argv.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program (first argument), if any.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// The encoded command line for this invocation.
    pub fn command_line(&self) -> String {
        crate::cmdline::encode_command_line(&self.argv)
    }
}

impl AsRef<[String]> for Invocation {
    fn as_ref(&self) -> &[String] {
        &self.argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let invocation = Invocation::new("pip.exe")
            .arg("install")
            .args(["torch", "torchvision"])
            .args(vec!["--index-url".to_string()]);

        assert_eq!(invocation.program(), Some("pip.exe"));
        assert_eq!(
            invocation.argv,
            vec!["pip.exe", "install", "torch", "torchvision", "--index-url"]
        );
    }

    #[test]
    fn test_command_line_is_encoded() {
        let invocation = Invocation::new("C:\\Program Files\\tool.exe").arg("a\"b");
        assert_eq!(
            invocation.command_line(),
            "\"C:\\Program Files\\tool.exe\" a\\\"b"
        );
    }

    #[test]
    fn test_default_is_empty() {
        let invocation = Invocation::default();
        assert_eq!(invocation.program(), None);
        assert_eq!(invocation.command_line(), "");
    }
}
