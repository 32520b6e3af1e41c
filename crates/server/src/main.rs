use anyhow::{Context, Result};
use clap::Parser;
use nie_forms_server::{router, Cli, Settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;

    for form in settings.forms.iter() {
        if !form.template.is_file() {
            warn!(form = %form.id, path = %form.template.display(), "template not found");
        }
        if !form.fields_json.is_file() {
            warn!(form = %form.id, path = %form.fields_json.display(), "geometry file not found");
        }
    }

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(addr = %cli.bind, forms = settings.forms.len(), "listening");

    axum::serve(listener, router(settings))
        .await
        .context("server error")?;

    Ok(())
}
