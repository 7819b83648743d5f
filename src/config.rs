use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::{DictionaryStore, PoolOptions};
use crate::{QueryService, SpreadsheetSource};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BizuConfig {
    pub database: Option<String>,
    pub source: Option<String>,
    pub pool_size: Option<u32>,
    pub busy_timeout_ms: Option<u64>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

impl BizuConfig {
    /// Config written by `bizu init`
    pub fn starter() -> Self {
        let pool = PoolOptions::default();
        Self {
            database: Some(default_database_path_in(Path::new(".")).display().to_string()),
            source: Some(default_source_path_in(Path::new(".")).display().to_string()),
            pool_size: Some(pool.max_size),
            busy_timeout_ms: Some(pool.busy_timeout.as_millis() as u64),
            server: Some(ServerConfig {
                host: Some(DEFAULT_HOST.to_string()),
                port: Some(DEFAULT_PORT),
            }),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_database_path_in(Path::new(".")))
    }

    pub fn source_path(&self) -> PathBuf {
        self.source
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_source_path_in(Path::new(".")))
    }

    pub fn pool_options(&self) -> PoolOptions {
        let defaults = PoolOptions::default();
        PoolOptions {
            max_size: self.pool_size.unwrap_or(defaults.max_size),
            busy_timeout: self
                .busy_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.busy_timeout),
            ..defaults
        }
    }

    pub fn host(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bizu.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".bizu").join("bizu.db")
}

pub fn default_source_path_in(base: &Path) -> PathBuf {
    base.join("data").join("lang.xlsx")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BizuConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BizuConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BizuConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_gitignore(project_root: &Path) -> anyhow::Result<()> {
    let gitignore_path = project_root.join(".gitignore");
    let entry = ".bizu/";

    let mut content = String::new();
    if gitignore_path.exists() {
        content = std::fs::read_to_string(&gitignore_path)?;
        if content.lines().any(|line| line.trim() == entry) {
            return Ok(());
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
    }
    content.push_str(entry);
    content.push('\n');
    std::fs::write(&gitignore_path, content)?;
    Ok(())
}

/// Open the pooled store and wrap it in a (not yet ready) query service
pub fn open_service(config: &BizuConfig) -> anyhow::Result<QueryService> {
    let db_path = config.database_path();
    ensure_db_dir(&db_path)?;
    let store = DictionaryStore::open_with(&db_path, config.pool_options())?;
    Ok(QueryService::new(store, SpreadsheetSource::new(config.source_path())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("bizu.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bizu.toml");

        write_config(&path, &BizuConfig::starter(), false).unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.port(), DEFAULT_PORT);
        assert_eq!(loaded.pool_options().max_size, 4);

        // Refuses to overwrite without force
        assert!(write_config(&path, &BizuConfig::default(), false).is_err());
        write_config(&path, &BizuConfig::default(), true).unwrap();
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: BizuConfig = toml::from_str(
            r#"
            database = "dict.db"
            busy_timeout_ms = 250

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path(), PathBuf::from("dict.db"));
        assert_eq!(config.source_path(), default_source_path_in(Path::new(".")));
        assert_eq!(config.pool_options().busy_timeout, Duration::from_millis(250));
        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.port(), 9000);
    }

    #[test]
    fn test_ensure_gitignore_appends_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "target/").unwrap();

        ensure_gitignore(dir.path()).unwrap();
        ensure_gitignore(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content, "target/\n.bizu/\n");
    }

    #[test]
    fn test_open_service_creates_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = BizuConfig {
            database: Some(dir.path().join("nested").join("bizu.db").display().to_string()),
            ..Default::default()
        };

        let service = open_service(&config).unwrap();
        assert!(!service.is_ready());
        assert!(dir.path().join("nested").join("bizu.db").exists());
    }
}
