use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub loans: LoansConfig,
    #[serde(default)]
    pub info: InfoConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8090, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply pending migrations on startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }

/// Which loan repository backs the service.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// `loans.loan_number` holds 64 characters; 12 of them are the generated digits.
pub const MAX_LOAN_NUMBER_PREFIX_LEN: usize = 64 - 12;

/// Defaults applied to every newly created loan account.
#[derive(Debug, Clone, Deserialize)]
pub struct LoansConfig {
    #[serde(default = "default_loan_type")]
    pub loan_type: String,
    #[serde(default = "default_total_loan")]
    pub total_loan: i32,
    #[serde(default)]
    pub loan_number_prefix: String,
}

impl Default for LoansConfig {
    fn default() -> Self {
        Self {
            loan_type: default_loan_type(),
            total_loan: default_total_loan(),
            loan_number_prefix: String::new(),
        }
    }
}

fn default_loan_type() -> String { "Home Loan".to_string() }
fn default_total_loan() -> i32 { 100_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct InfoConfig {
    #[serde(default = "default_build_version")]
    pub build_version: String,
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self { build_version: default_build_version(), message: default_message(), contact: ContactConfig::default() }
    }
}

fn default_build_version() -> String { "1.0".to_string() }
fn default_message() -> String { "Welcome to the loans service".to_string() }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContactConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub on_call_support: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config without a file on disk: defaults plus `SERVER_HOST`/`SERVER_PORT`/`STORAGE_BACKEND`/`DATABASE_URL`.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number in 1..=65535, got {:?}", port))?;
        }
        if let Some(backend) = var("STORAGE_BACKEND") {
            self.storage.backend = match backend.to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "postgres" => StorageBackend::Postgres,
                _ => return Err(anyhow!("STORAGE_BACKEND must be \"postgres\" or \"memory\", got {:?}", backend)),
            };
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.loans.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.normalize_from_env();
            self.database.validate()?;
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl LoansConfig {
    fn validate(&self) -> Result<()> {
        if self.loan_type.trim().is_empty() {
            return Err(anyhow!("loans.loan_type must not be empty"));
        }
        if self.total_loan < 0 {
            return Err(anyhow!("loans.total_loan must be >= 0"));
        }
        if !self.loan_number_prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(anyhow!("loans.loan_number_prefix may only contain alphanumerics and '-'"));
        }
        if self.loan_number_prefix.len() > MAX_LOAN_NUMBER_PREFIX_LEN {
            return Err(anyhow!(
                "loans.loan_number_prefix must be at most {} characters",
                MAX_LOAN_NUMBER_PREFIX_LEN
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg.server.port, 8090);
        assert_eq!(cfg.loans.loan_type, "Home Loan");
        assert_eq!(cfg.loans.total_loan, 100_000);
        assert_eq!(cfg.storage.backend, StorageBackend::Postgres);
        assert_eq!(cfg.log.format, LogFormat::Compact);
    }

    #[test]
    fn parses_sections() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [storage]
            backend = "memory"

            [loans]
            loan_type = "Car Loan"
            total_loan = 50000
            loan_number_prefix = "LN"

            [info]
            build_version = "3.1"
            contact = { name = "Loans Desk", email = "loans@example.com", on_call_support = ["+1-555-0100"] }

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.loans.total_loan, 50_000);
        assert_eq!(cfg.loans.loan_number_prefix, "LN");
        assert_eq!(cfg.info.build_version, "3.1");
        assert_eq!(cfg.info.contact.on_call_support.len(), 1);
        assert_eq!(cfg.log.format, LogFormat::Json);
    }

    #[test]
    fn memory_backend_skips_database_validation() {
        let mut cfg = load_from_str("[storage]\nbackend = \"memory\"\n[server]\nhost = \"\"\nport = 8090\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn rejects_bad_database_url() {
        let db = DatabaseConfig { url: "mysql://localhost/loans".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_err());
        let db = DatabaseConfig { url: "postgres://localhost/loans".into(), ..DatabaseConfig::default() };
        assert!(db.validate().is_ok());
    }

    #[test]
    fn rejects_negative_default_total() {
        let mut cfg = load_from_str("[storage]\nbackend = \"memory\"\n[loans]\ntotal_loan = -1\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn loan_number_prefix_fits_the_column() {
        let ok = format!("[storage]\nbackend = \"memory\"\n[loans]\nloan_number_prefix = \"{}\"\n", "A".repeat(52));
        load_from_str(&ok).unwrap().normalize_and_validate().unwrap();

        let long = format!("[storage]\nbackend = \"memory\"\n[loans]\nloan_number_prefix = \"{}\"\n", "A".repeat(53));
        let err = load_from_str(&long).unwrap().normalize_and_validate().unwrap_err();
        assert!(err.to_string().contains("at most 52"), "{err}");
    }

    fn fake_env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: std::collections::HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn env_overrides_are_parsed_strictly() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(fake_env(&[("SERVER_PORT", "9100"), ("STORAGE_BACKEND", "Memory")])).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);

        for bad in ["80a", "70000", "-1", ""] {
            let mut cfg = AppConfig::default();
            assert!(cfg.apply_env(fake_env(&[("SERVER_PORT", bad)])).is_err(), "{bad:?}");
            assert_eq!(cfg.server.port, 8090);
        }

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(fake_env(&[("STORAGE_BACKEND", "redis")])).is_err());
    }
}
