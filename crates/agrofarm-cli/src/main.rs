mod render;
mod repl;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::repl::App;

#[derive(Debug, Parser)]
#[command(name = "agrofarm")]
#[command(about = "AgroFarm marketplace cart and checkout")]
struct Cli {
    /// Sign in with this email before the prompt opens
    #[arg(long, env = "AGROFARM_EMAIL", requires = "password")]
    email: Option<String>,
    /// Password for --email
    #[arg(long, env = "AGROFARM_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Skip the initial cart fetch
    #[arg(long)]
    offline: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // `.env` feeds both the flags' env fallbacks and the config; flags are
    // parsed first so `--help` works even with a broken config.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = agrofarm_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "starting");

    let mut app = App::new(config)?;

    if let (Some(email), Some(password)) = (cli.email, cli.password) {
        app.login(&email, &password).await;
    }
    if !cli.offline {
        app.show_cart(true).await;
    }

    app.run().await
}

#[cfg(test)]
mod tests;
