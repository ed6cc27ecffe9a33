//! Runtime configuration read from environment variables.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "CONDO_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "CONDO_BIND_ADDR";
pub const ALLOWED_ORIGIN_VAR: &str = "CONDO_ALLOWED_ORIGIN";
pub const READ_ONLY_VAR: &str = "CONDO_READ_ONLY";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    pub allowed_origin: String,
    /// Deny every mutating action
    pub read_only: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            allowed_origin: "http://localhost:8080".to_string(),
            read_only: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build a config from an explicit variable map; unset variables keep defaults
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = non_blank(vars, DATA_DIR_VAR) {
            config.data_directory = PathBuf::from(dir);
        }
        if let Some(addr) = non_blank(vars, BIND_ADDR_VAR) {
            config.bind_address = addr
                .parse()
                .with_context(|| format!("{} must be a socket address, got '{}'", BIND_ADDR_VAR, addr))?;
        }
        if let Some(origin) = non_blank(vars, ALLOWED_ORIGIN_VAR) {
            config.allowed_origin = origin.to_string();
        }
        if let Some(flag) = non_blank(vars, READ_ONLY_VAR) {
            config.read_only = parse_bool(flag)
                .with_context(|| format!("{} must be true or false, got '{}'", READ_ONLY_VAR, flag))?;
        }

        Ok(config)
    }
}

fn non_blank<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("unrecognized boolean '{}'", other)),
    }
}
