//! Network name → admission-control endpoint resolution.

use crate::config::loader::ConfigError;
use crate::config::schema::NetworkConfig;

/// Built-in network table entry.
struct KnownNetwork {
    name: &'static str,
    host: &'static str,
    port: u16,
    faucet_host: Option<&'static str>,
}

const KNOWN_NETWORKS: &[KnownNetwork] = &[KnownNetwork {
    name: "testnet",
    host: "ac.testnet.libra.org",
    port: 8000,
    faucet_host: Some("faucet.testnet.libra.org"),
}];

/// Resolved endpoint, fixed at client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEndpoint {
    pub host: String,
    pub port: u16,
    pub faucet_host: Option<String>,
}

impl NetworkEndpoint {
    /// Base URL of the admission-control service. IPv6 hosts are bracketed.
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

/// Resolve the configured network into a concrete endpoint.
///
/// Explicit `host`/`port`/`faucet_host` values override a known network's
/// entries; "custom" requires both host and port.
pub fn resolve_endpoint(config: &NetworkConfig) -> Result<NetworkEndpoint, ConfigError> {
    let port = config.port.map(checked_port).transpose()?;

    match config.name.as_str() {
        "mainnet" => Err(ConfigError::UnsupportedNetwork(config.name.clone())),
        "custom" => {
            let host = config.host.clone().ok_or(ConfigError::MissingHost)?;
            let port = port.ok_or(ConfigError::MissingPort)?;
            Ok(NetworkEndpoint {
                host,
                port,
                faucet_host: config.faucet_host.clone(),
            })
        }
        name => {
            let known = KNOWN_NETWORKS
                .iter()
                .find(|n| n.name == name)
                .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))?;
            Ok(NetworkEndpoint {
                host: config.host.clone().unwrap_or_else(|| known.host.to_string()),
                port: port.unwrap_or(known.port),
                faucet_host: config
                    .faucet_host
                    .clone()
                    .or_else(|| known.faucet_host.map(str::to_string)),
            })
        }
    }
}

fn checked_port(port: u32) -> Result<u16, ConfigError> {
    u16::try_from(port)
        .ok()
        .filter(|p| *p > 0)
        .ok_or(ConfigError::InvalidPort(port))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(name: &str) -> NetworkConfig {
        NetworkConfig {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_testnet_resolves_from_table() {
        let endpoint = resolve_endpoint(&network("testnet")).unwrap();
        assert_eq!(endpoint.host, "ac.testnet.libra.org");
        assert_eq!(endpoint.port, 8000);
        assert_eq!(endpoint.faucet_host.as_deref(), Some("faucet.testnet.libra.org"));
    }

    #[test]
    fn test_mainnet_and_unknown_rejected() {
        assert!(matches!(
            resolve_endpoint(&network("mainnet")),
            Err(ConfigError::UnsupportedNetwork(_))
        ));
        assert!(matches!(
            resolve_endpoint(&network("devnet-42")),
            Err(ConfigError::UnknownNetwork(name)) if name == "devnet-42"
        ));
    }

    #[test]
    fn test_custom_requires_host_and_valid_port() {
        let mut config = network("custom");
        assert!(matches!(resolve_endpoint(&config), Err(ConfigError::MissingHost)));

        config.host = Some("10.0.0.1".into());
        assert!(matches!(resolve_endpoint(&config), Err(ConfigError::MissingPort)));

        config.port = Some(65_536);
        assert!(matches!(
            resolve_endpoint(&config),
            Err(ConfigError::InvalidPort(65_536))
        ));

        config.port = Some(8080);
        let endpoint = resolve_endpoint(&config).unwrap();
        assert_eq!(endpoint.base_url(), "http://10.0.0.1:8080");
        assert_eq!(endpoint.faucet_host, None);
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let endpoint = NetworkEndpoint {
            host: "::1".into(),
            port: 8000,
            faucet_host: None,
        };
        assert_eq!(endpoint.base_url(), "http://[::1]:8000");
    }
}
