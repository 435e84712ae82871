use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use company_profiler::config::{CorsSettings, LoggingSettings, Settings};
use company_profiler::error::handle_query_payload_error;
use company_profiler::routes::{self, AppState};
use company_profiler::services::{GeminiAnalyzer, GeminiClient, ProfileAnalyzer, WebsiteFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "company-profiler", version, about = "Company website profiler API")]
struct Args {
    /// Settings file to use instead of config/default.toml and config/local.toml
    #[arg(long, env = "PROFILER_CONFIG")]
    config: Option<PathBuf>,
}

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_cors(settings: &CorsSettings) -> Cors {
    if settings.allowed_origins.is_empty() {
        return Cors::permissive();
    }

    settings
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Load configuration before logging so the log settings apply
    let loaded = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(io_error(format!("Configuration error: {}", e)));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting company profiler service...");
    info!("Configuration loaded: {:?}", settings.gemini);

    let fetcher = WebsiteFetcher::new(
        Duration::from_secs(settings.analysis.fetch_timeout_secs),
        &settings.analysis.user_agent,
        settings.analysis.max_content_chars,
    )
    .map_err(|e| io_error(format!("Failed to create website fetcher: {}", e)))?;

    let gemini = GeminiClient::new(
        settings.gemini.base_url.clone(),
        settings.gemini.api_key.clone(),
        settings.gemini.model.clone(),
        Duration::from_secs(settings.gemini.request_timeout_secs),
    )
    .map_err(|e| io_error(format!("Failed to create Gemini client: {}", e)))?;

    info!("Gemini client initialized (model: {})", gemini.model());

    let analyzer: Arc<dyn ProfileAnalyzer> = Arc::new(GeminiAnalyzer::new(fetcher, gemini));

    let app_state = AppState {
        analyzer,
        analysis_timeout: settings.analysis.timeout(),
    };

    info!(
        "Analysis deadline set to {}s",
        settings.analysis.timeout_secs
    );

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let cors_settings = settings.cors.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(build_cors(&cors_settings))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
