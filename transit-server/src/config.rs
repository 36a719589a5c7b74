//! Server configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Address used when `TRANSIT_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

/// Longest accepted cache TTL. The cache refuses anything near 1000 years.
pub const MAX_CACHE_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Errors in the server environment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServerConfigError {
    /// A required variable is unset
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Path of the network document to load at startup
    pub network_path: PathBuf,

    /// Route cache limits
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through a variable lookup function.
    ///
    /// Recognised variables: `TRANSIT_NETWORK` (required),
    /// `TRANSIT_BIND_ADDR`, `TRANSIT_CACHE_CAPACITY` and
    /// `TRANSIT_CACHE_TTL_SECS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network_path = lookup("TRANSIT_NETWORK")
            .map(PathBuf::from)
            .ok_or(ServerConfigError::Missing("TRANSIT_NETWORK"))?;

        let bind_addr = parse_var(&lookup, "TRANSIT_BIND_ADDR")?.unwrap_or(DEFAULT_BIND_ADDR);

        let defaults = CacheConfig::default();
        let cache = CacheConfig {
            max_capacity: parse_var(&lookup, "TRANSIT_CACHE_CAPACITY")?
                .unwrap_or(defaults.max_capacity),
            ttl: parse_ttl(&lookup)?.unwrap_or(defaults.ttl),
        };

        Ok(Self {
            bind_addr,
            network_path,
            cache,
        })
    }
}

/// Parse an optional variable, failing if it is set but malformed.
fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ServerConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ServerConfigError::Invalid { name, value }),
    }
}

/// Parse `TRANSIT_CACHE_TTL_SECS`, rejecting values above [`MAX_CACHE_TTL_SECS`].
fn parse_ttl<F>(lookup: &F) -> Result<Option<Duration>, ServerConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const NAME: &str = "TRANSIT_CACHE_TTL_SECS";
    match parse_var::<u64, F>(lookup, NAME)? {
        Some(secs) if secs > MAX_CACHE_TTL_SECS => Err(ServerConfigError::Invalid {
            name: NAME,
            value: secs.to_string(),
        }),
        secs => Ok(secs.map(Duration::from_secs)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ServerConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_network_is_set() {
        let config = config(&[("TRANSIT_NETWORK", "/data/network.json")]).unwrap();
        assert_eq!(config.network_path, PathBuf::from("/data/network.json"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn network_is_required() {
        assert_eq!(
            config(&[]).unwrap_err(),
            ServerConfigError::Missing("TRANSIT_NETWORK")
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config(&[
            ("TRANSIT_NETWORK", "net.json"),
            ("TRANSIT_BIND_ADDR", "0.0.0.0:8080"),
            ("TRANSIT_CACHE_CAPACITY", "250"),
            ("TRANSIT_CACHE_TTL_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.cache.max_capacity, 250);
        assert_eq!(config.cache.ttl, Duration::from_secs(30));
    }

    #[test]
    fn oversized_ttl_is_rejected() {
        let max = MAX_CACHE_TTL_SECS.to_string();
        let accepted = config(&[
            ("TRANSIT_NETWORK", "net.json"),
            ("TRANSIT_CACHE_TTL_SECS", max.as_str()),
        ])
        .unwrap();
        assert_eq!(accepted.cache.ttl, Duration::from_secs(MAX_CACHE_TTL_SECS));

        let huge = u64::MAX.to_string();
        let err = config(&[
            ("TRANSIT_NETWORK", "net.json"),
            ("TRANSIT_CACHE_TTL_SECS", huge.as_str()),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ServerConfigError::Invalid {
                name: "TRANSIT_CACHE_TTL_SECS",
                value: huge
            }
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = config(&[
            ("TRANSIT_NETWORK", "net.json"),
            ("TRANSIT_CACHE_CAPACITY", "lots"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ServerConfigError::Invalid {
                name: "TRANSIT_CACHE_CAPACITY",
                value: "lots".into()
            }
        );
    }
}
