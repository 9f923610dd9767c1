//! CLI entry point for winprov.

mod cli;

use clap::Parser;
use winprov::{ProvisionConfig, ProvisionError, Provisioner};

fn load_config(args: &cli::Args) -> Result<ProvisionConfig, ProvisionError> {
    let mut builder = ProvisionConfig::builder()
        .with_env(|key| std::env::var(key).ok())
        .work_dir(&args.work_dir);

    if let Some(username) = &args.username {
        builder = builder.username(username);
    }
    if args.scoop_packages {
        builder = builder.install_scoop_packages(true);
    }
    if args.npm_packages {
        builder = builder.install_npm_packages(true);
    }
    if args.python_packages {
        builder = builder.install_python_packages(true);
    }
    if let Some(threads) = args.copy_threads {
        builder = builder.copy_threads(threads);
    }

    builder.build()
}

#[tokio::main]
async fn main() {
    let log_spec = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(cli::log_filter(log_spec.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let result = match load_config(&args) {
        Ok(config) => Provisioner::new(config).run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("\n--- SCRIPT FAILED ---");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
