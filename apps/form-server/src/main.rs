//! Office Form Server
//!
//! Renders the fuel card management form and the staff gate pass over HTTP:
//!
//! - `GET  /health`
//! - `GET  /api/forms` lists the forms and the data keys they take
//! - `GET  /api/forms/:name/sample` returns demo data for a form
//! - `POST /api/forms/:name/render` answers with the document base64 encoded in JSON
//! - `POST /api/forms/:name/file` answers with the document bytes
//!
//! Configuration comes from a TOML file (`--config` or `FORMS_CONFIG`);
//! a `.env` file in the working directory is loaded first.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use form_engine::{EngineConfig, FormRenderer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_health, handle_list_forms, handle_render, handle_render_file, handle_sample};

/// Command-line arguments for the form server
#[derive(Parser, Debug)]
#[command(name = "form-server")]
#[command(about = "HTTP server for the fuel card and gate pass forms")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Engine configuration file (TOML)
    #[arg(short, long, env = "FORMS_CONFIG")]
    config: Option<PathBuf>,

    /// Directory with logo and signature images (overrides the config file)
    #[arg(long, env = "FORMS_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Render timeout in milliseconds (overrides the config file)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<FormRenderer>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            renderer: Arc::new(FormRenderer::new(config)),
        }
    }
}

/// Build the router with every route and middleware
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/forms", get(handle_list_forms))
        .route("/api/forms/:name/sample", get(handle_sample))
        .route("/api/forms/:name/render", post(handle_render))
        .route("/api/forms/:name/file", post(handle_render_file))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &args.assets_dir {
        config.assets_dir = Some(dir.clone());
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout_ms = ms;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(&args)?;
    info!(
        "Organization: {}, assets: {}",
        config.organization,
        config
            .assets_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    info!("Render timeout: {}ms", config.timeout_ms);

    let state = AppState::new(config);
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
