use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chirpy_api::Platform;

/// Process configuration, read from the environment (after `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub platform: Platform,
    pub filepath_root: PathBuf,
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get("CHIRPY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("CHIRPY_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("CHIRPY_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        let timeout_ms: u64 = get("CHIRPY_STORE_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("CHIRPY_STORE_TIMEOUT_MS must be a whole number of milliseconds")?;

        Ok(Self {
            addr,
            db_path: get("CHIRPY_DB_PATH").unwrap_or_else(|| "chirpy.db".into()).into(),
            platform: Platform::from_flag(&get("CHIRPY_PLATFORM").unwrap_or_default()),
            filepath_root: get("CHIRPY_FILEPATH_ROOT").unwrap_or_else(|| ".".into()).into(),
            store_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.db_path, PathBuf::from("chirpy.db"));
        assert_eq!(cfg.platform, Platform::Other);
        assert_eq!(cfg.filepath_root, PathBuf::from("."));
        assert_eq!(cfg.store_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides() {
        let cfg = load(&[
            ("CHIRPY_HOST", "127.0.0.1"),
            ("CHIRPY_PORT", "9000"),
            ("CHIRPY_PLATFORM", "dev"),
            ("CHIRPY_STORE_TIMEOUT_MS", "250"),
        ])
        .unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.platform, Platform::Dev);
        assert_eq!(cfg.store_timeout, Duration::from_millis(250));
    }

    #[test]
    fn bad_numbers_fail() {
        assert!(load(&[("CHIRPY_PORT", "eighty")]).is_err());
        assert!(load(&[("CHIRPY_STORE_TIMEOUT_MS", "-1")]).is_err());
    }
}
