use dotenvy::dotenv;
use server::startup::ConfigSource;
use tracing::{error, info, warn};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG / DATABASE_URL are visible to everything below
    dotenv().ok();

    let (cfg, source) = match server::startup::load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "loans", event = "config_invalid", error = %e, "configuration rejected");
            return std::process::ExitCode::FAILURE;
        }
    };

    match cfg.log.format {
        configs::LogFormat::Json => common::utils::logging::init_logging_json(),
        configs::LogFormat::Compact => common::utils::logging::init_logging_default(),
    }
    info!(service = "loans", event = "logger_init", "tracing subscriber initialized");
    match &source {
        ConfigSource::File(path) => info!(service = "loans", event = "config_loaded", %path, "configuration loaded from file"),
        ConfigSource::Environment(path) => {
            warn!(service = "loans", event = "config_fallback", %path, "config file not found; using defaults and environment")
        }
    }

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "loans",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "loans", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "loans",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "loans service starting"
    );

    rt.block_on(async move {
        let shutdown = async move {
            let _ = tokio::signal::ctrl_c().await;
            info!(service = "loans", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
        };
        match server::startup::run_with_config(cfg, shutdown).await {
            Ok(()) => {
                info!(service = "loans", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "loans", event = "run_failed", error = %e, "server returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
