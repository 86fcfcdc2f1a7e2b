use clap::Parser;
use dotenvy::dotenv;
use schoolhub::cli::{Cli, run};
use schoolhub::logging::init_tracing;
use schoolhub_config::ClientConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    init_tracing(&config.log, &config.storage.log_dir());

    if let Err(e) = run(config, cli.command).await {
        eprintln!("\n❌ {}", e);
        if e.requires_login() {
            eprintln!("   Run `schoolhub login` to start a new session.");
        }
        std::process::exit(1);
    }
}
