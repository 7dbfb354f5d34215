//! reqlog CLI

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use http::{Method, Request};
use reqlog_config::{load_config, Config, ObservabilityConfig};
use reqlog_core::{MemorySink, TracingSink};
use reqlog_middleware::RequestLogger;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "reqlog")]
#[command(about = "Log HTTP requests with correlation ids", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a request described on the command line and print its correlation id
    Log {
        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path
        #[arg(short, long, default_value = "/")]
        path: String,

        /// Query string, with or without the leading `?`
        #[arg(short, long)]
        query: Option<String>,

        /// Header in `Name: value` form (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Request body
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the request body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long, env = "REQLOG_CONFIG")]
        config: Option<PathBuf>,

        /// Log level, overrides the configuration file
        #[arg(short, long)]
        log_level: Option<String>,

        /// Print the log lines to stdout instead of emitting tracing events
        #[arg(long)]
        plain: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to configuration file
        #[arg(short, long, default_value = "reqlog.yaml")]
        config: PathBuf,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Log {
            method,
            path,
            query,
            headers,
            body,
            body_file,
            config,
            log_level,
            plain,
        } => {
            let config = match config {
                Some(path) => load_config(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => Config::default(),
            };

            if !plain {
                init_tracing(&config.observability, log_level.as_deref())?;
            }

            let body = match (body, body_file) {
                (Some(text), _) => Bytes::from(text),
                (None, Some(file)) => Bytes::from(
                    tokio::fs::read(&file)
                        .await
                        .with_context(|| format!("reading body from {}", file.display()))?,
                ),
                (None, None) => Bytes::new(),
            };

            let request = build_request(&method, &path, query.as_deref(), &headers, body)?;

            if plain {
                let sink = Arc::new(MemorySink::new());
                let logger = RequestLogger::with_config(Arc::clone(&sink), config.logging);
                let request_id = logger.log_request(&request);
                for line in sink.drain() {
                    println!("{line}");
                }
                println!("{request_id}");
            } else {
                let logger = RequestLogger::with_config(TracingSink::new(), config.logging);
                let request_id = logger.log_request(&request);
                println!("{request_id}");
            }

            Ok(())
        }

        Commands::Validate { config } => {
            tracing_subscriber::fmt().with_target(false).init();

            tracing::info!("Validating configuration: {}", config.display());

            match load_config(&config) {
                Ok(cfg) => {
                    tracing::info!("✓ Configuration is valid");
                    tracing::info!("  Max field length: {}", cfg.logging.max_field_length);
                    tracing::info!("  Max path length: {}", cfg.logging.max_path_length);
                    tracing::info!("  Auth header: {}", cfg.logging.auth_header);
                    tracing::info!(
                        "  Correlation header: {}",
                        cfg.logging.correlation_header.as_deref().unwrap_or("(none)")
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("✗ Configuration validation failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Version => {
            println!("reqlog");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
            Ok(())
        }
    }
}

/// Assemble an in-memory request from command line parts
fn build_request(
    method: &str,
    path: &str,
    query: Option<&str>,
    headers: &[String],
    body: Bytes,
) -> Result<Request<Bytes>> {
    let method = Method::from_bytes(method.to_uppercase().as_bytes())
        .with_context(|| format!("invalid method {method:?}"))?;

    let mut uri = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if let Some(query) = query {
        let query = query.strip_prefix('?').unwrap_or(query);
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(query);
        }
    }

    let mut builder = Request::builder().method(method).uri(uri);
    for header in headers {
        let Some((name, value)) = header.split_once(':') else {
            bail!("header {header:?} is not in `Name: value` form");
        };
        builder = builder.header(name.trim(), value.trim());
    }

    builder.body(body).context("invalid request")
}

fn init_tracing(observability: &ObservabilityConfig, level: Option<&str>) -> Result<()> {
    let directive = level.unwrap_or(&observability.level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .with_context(|| format!("invalid log level {directive:?}"))?;

    let registry = tracing_subscriber::registry().with(filter);

    if observability.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_level(true),
            )
            .init();
    }

    Ok(())
}
