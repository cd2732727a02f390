use std::env::VarError;

use anyhow::Context;
use serde::Deserialize;

/// Port the listener uses when nothing else is configured.
pub const DEFAULT_PORT: u16 = 6266;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen: ListenConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    /// 0 disables the listener.
    pub port: u16,
    /// Command lists that may queue before handlers wait.
    pub channel_capacity: usize,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            channel_capacity: 16,
        }
    }
}

impl Config {
    /// Reads `CMDPORT_CONFIG` (a YAML file) if set, then applies `LISTEN` and
    /// `LISTEN_HOST` from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match config_path(std::env::var("CMDPORT_CONFIG"))? {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                Self::from_yaml_str(&raw)
                    .with_context(|| format!("failed to parse config file {path}"))?
            }
            None => Self::default(),
        };

        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies `LISTEN` (`[HOST:]PORT`) and `LISTEN_HOST` through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(spec) = lookup("LISTEN") {
            let (host, port) = parse_listen_spec(&spec)?;
            if let Some(host) = host {
                self.listen.host = host;
            }
            self.listen.port = port;
        }

        if let Some(host) = lookup("LISTEN_HOST") {
            self.listen.host = host;
        }

        Ok(())
    }
}

/// Interprets the `CMDPORT_CONFIG` lookup. Only an unset variable means
/// "no config file".
pub fn config_path(var: Result<String, VarError>) -> anyhow::Result<Option<String>> {
    match var {
        Ok(path) => Ok(Some(path)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e @ VarError::NotUnicode(_)) => Err(e).context("CMDPORT_CONFIG is not valid unicode"),
    }
}

/// Parses `PORT` or `HOST:PORT`.
pub fn parse_listen_spec(spec: &str) -> anyhow::Result<(Option<String>, u16)> {
    let spec = spec.trim();
    let (host, port) = match spec.rsplit_once(':') {
        Some((host, port)) => (Some(host), port),
        None => (None, spec),
    };

    let port = port
        .parse::<u16>()
        .with_context(|| format!("invalid listen address: {spec}"))?;

    match host {
        Some("") => anyhow::bail!("invalid listen address: {spec}"),
        Some(host) => Ok((Some(host.to_string()), port)),
        None => Ok((None, port)),
    }
}
