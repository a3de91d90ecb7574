// Main entry point - Build, validate and write the dashboard
mod application;
mod domain;
mod infrastructure;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_builder::{build, build_from_definition};
use crate::infrastructure::config::{load_dashboard_definition, load_generator_settings};
use crate::infrastructure::grafana_json::render;

fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr, stdout carries the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let settings = load_generator_settings()?;

    let dashboard = match &settings.definition_path {
        Some(path) => {
            tracing::info!("Building dashboard from {}", path);
            build_from_definition(&load_dashboard_definition(path)?)
        }
        None => build(),
    };
    let dashboard = dashboard.with_uid(settings.uid.clone());

    if let Err(e) = dashboard.validate() {
        tracing::error!("Invalid dashboard {}: {}", dashboard.title, e);
        return Err(e.into());
    }

    let json = render(&dashboard, settings.pretty)?;

    match &settings.output_path {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write dashboard to {}", path))?;
            tracing::info!(
                "Wrote {} ({} panels) to {}",
                dashboard.title,
                dashboard.panel_count(),
                path
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
