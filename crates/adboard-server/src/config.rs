use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PATH: &str = "adboard.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Drop and recreate the schema before serving. Destroys all data.
    pub reset_db: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("ADBOARD_HOST").unwrap_or_else(|| DEFAULT_HOST.into());

        let port = match lookup("ADBOARD_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("ADBOARD_PORT is not a port number: {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let db_path = lookup("ADBOARD_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.into())
            .into();

        let reset_db = match lookup("ADBOARD_RESET_DB") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("ADBOARD_RESET_DB is not a boolean: {:?}", raw))?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            db_path,
            reset_db,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
