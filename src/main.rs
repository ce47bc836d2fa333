use clap::Parser;
use color_eyre::eyre::Result;
use laptop_daemon::cors::{build_cors_layer, normalize_origins, DEFAULT_CORS_ORIGINS};
use laptop_daemon::grpc_logging::GrpcLoggingLayer;
use laptop_daemon::logging::{
    default_log_dir, init_logging, parse_rotation, set_log_file_path, LogConfig, LOG_FILENAME,
};
use laptop_daemon::{load_user_config, LaptopDaemonService, UserConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tonic::transport::Server;
use tracing::{info, warn};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Laptop daemon - in-memory laptop catalogue served over gRPC
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "LAPTOP_DAEMON_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Comma-separated list of allowed CORS origin prefixes for gRPC-Web.
    /// Use "*" to allow all origins.
    #[arg(
        long,
        env = "LAPTOP_CORS_ORIGINS",
        default_value = DEFAULT_CORS_ORIGINS,
        value_delimiter = ','
    )]
    cors_origins: Vec<String>,

    /// Enable JSON log format
    #[arg(long, env = "LAPTOP_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "LAPTOP_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.laptop-daemon/logs)
    #[arg(long, env = "LAPTOP_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Config file (default: ~/.laptop-daemon/config.toml)
    #[arg(long, env = "LAPTOP_DAEMON_CONFIG")]
    config: Option<PathBuf>,
}

fn report_server_error(addr: SocketAddr, log_file: &Path, e: &tonic::transport::Error) {
    if format!("{e:?}").contains("AddrInUse") {
        eprintln!();
        eprintln!("Error: address {addr} is already in use");
        eprintln!("Another laptop-daemon may already be running; pick another port with --addr.");
    }
    eprintln!();
    eprintln!("Error: Failed to start server: {e}");
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl-C, stopping server...");
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let log_dir = args.log_dir.unwrap_or_else(default_log_dir);
    let log_file = log_dir.join(LOG_FILENAME);
    set_log_file_path(log_file.clone());

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_config) {
        eprintln!("Error: Failed to initialize logging: {e}");
        return Err(e);
    }

    let user_cfg = load_user_config(args.config.as_deref()).unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e}");
        UserConfig::default()
    });

    let addr: SocketAddr = args.addr.parse()?;

    let cors_origins = normalize_origins(&args.cors_origins);
    info!("CORS origins: {}", cors_origins.join(", "));
    let cors = build_cors_layer(cors_origins);

    let service = LaptopDaemonService::in_memory(&user_cfg.search);

    info!(
        stream_buffer = user_cfg.search.effective_stream_buffer(),
        "Starting laptop daemon on {} (gRPC + gRPC-Web)", addr
    );

    let server_result = Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(GrpcLoggingLayer)
        .layer(tonic_web::GrpcWebLayer::new())
        .add_service(service.into_server())
        .serve_with_shutdown(addr, shutdown_signal())
        .await;

    if let Err(e) = server_result {
        report_server_error(addr, &log_file, &e);
        return Err(e.into());
    }

    info!("Laptop daemon stopped");
    Ok(())
}
