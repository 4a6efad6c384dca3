use clap::Parser;
use soldrank::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before parsing so clap's env fallbacks see it
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Cli::parse().into_config();
    soldrank::run(&config).await?;

    println!("wrote result to {}", config.output.path.display());
    Ok(())
}
