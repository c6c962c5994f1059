//! HTTP listener settings read from the environment.

use crate::errors::{Error, Result};
use std::net::{IpAddr, SocketAddr};

/// Address the API binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to listen on (`HOST`, default `0.0.0.0`)
    pub host: IpAddr,
    /// Port to listen on (`PORT`, default `7000`)
    pub port: u16,
}

impl ServerConfig {
    /// Default port when `PORT` is not set.
    pub const DEFAULT_PORT: u16 = 7000;

    /// Reads `HOST` and `PORT` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_values(std::env::var("HOST").ok(), std::env::var("PORT").ok())
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Result<Self> {
        let host = host
            .as_deref()
            .unwrap_or("0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| Error::Config {
                message: format!("Invalid HOST: {e}"),
            })?;
        let port = match port {
            Some(raw) => raw.parse::<u16>().map_err(|e| Error::Config {
                message: format!("Invalid PORT '{raw}': {e}"),
            })?,
            None => Self::DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    /// Socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
