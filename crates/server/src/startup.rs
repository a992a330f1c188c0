use std::{future::Future, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::loans::{
    memory::InMemoryLoanRepository, repo::seaorm::SeaOrmLoanRepository, repository::LoanRepository, LoanDefaults,
    LoanService,
};

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Where the running configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    /// No file at this path; defaults plus environment variables.
    Environment(String),
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise defaults plus env vars.
///
/// Nothing is logged here; the caller reports the source once logging is up.
pub fn load_config() -> anyhow::Result<(AppConfig, ConfigSource)> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config_from(&path)
}

pub fn load_config_from(path: &str) -> anyhow::Result<(AppConfig, ConfigSource)> {
    if Path::new(path).exists() {
        let mut cfg = configs::load_from_file(path)?;
        cfg.normalize_and_validate()?;
        Ok((cfg, ConfigSource::File(path.to_string())))
    } else {
        Ok((AppConfig::from_env()?, ConfigSource::Environment(path.to_string())))
    }
}

/// Pick the repository named by `[storage]` and wire the loan service to it.
pub async fn build_state(cfg: AppConfig) -> anyhow::Result<ServerState> {
    let repo: Arc<dyn LoanRepository> = match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory loan storage; data is lost on restart");
            Arc::new(InMemoryLoanRepository::new())
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                models::db::migrate(&db).await?;
                info!("database migrations applied");
            }
            Arc::new(SeaOrmLoanRepository { db })
        }
    };
    let loans = LoanService::new(repo, LoanDefaults::from(&cfg.loans));
    Ok(ServerState::new(loans, cfg))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Serve until `shutdown` resolves; in-flight requests are allowed to finish.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(&cfg)?;
    let state = build_state(cfg).await?;
    let app = build_app(state);

    info!(%addr, "starting loans server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("loans server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_is_reported_as_source() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("loans-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[storage]\nbackend = \"memory\"\n[server]\nport = 9191\nhost = \"\"\n")?;
        let path = path.to_string_lossy().into_owned();

        let loaded = load_config_from(&path);
        std::fs::remove_file(&path)?;
        let (cfg, source) = loaded?;

        assert_eq!(source, ConfigSource::File(path));
        assert_eq!(cfg.server.port, 9191);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        Ok(())
    }
}
