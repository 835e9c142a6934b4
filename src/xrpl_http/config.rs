use std::{str::FromStr, time::Duration};

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the JSON-RPC endpoint (a URL, or `mainnet` /
/// `testnet`).
pub const RPC_URL_ENV: &str = "XRPL_RPC_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// XRP Ledger network to talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Custom(String),
}

impl Network {
    pub fn api_url(&self) -> &str {
        match self {
            Network::Mainnet => "https://xrplcluster.com/",
            Network::Testnet => "https://s.altnet.rippletest.net:51234/",
            Network::Custom(url) => url,
        }
    }
}

impl FromStr for Network {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            _ => Network::Custom(s.trim().to_string()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(network: &Network) -> Result<Self> {
        let url = Url::parse(network.api_url()).map_err(|e| {
            Error::InvalidConfig(format!("bad RPC url {:?}: {e}", network.api_url()))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self {
                url,
                timeout: DEFAULT_TIMEOUT,
            }),
            other => Err(Error::InvalidConfig(format!(
                "unsupported scheme {other:?}, expected http or https"
            ))),
        }
    }

    /// Reads `XRPL_RPC_URL`, falling back to mainnet when unset. Callers load
    /// `.env` beforehand if they want it honoured. A set but unusable value is
    /// an error, not a silent switch to mainnet.
    pub fn from_env() -> Result<Self> {
        match std::env::var(RPC_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                let Ok(network) = value.parse::<Network>();
                Self::new(&network)
            }
            _ => Self::new(&Network::Mainnet),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_names_parse() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(" Testnet ".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(
            "http://localhost:5005".parse::<Network>().unwrap(),
            Network::Custom("http://localhost:5005".into())
        );
    }

    #[test]
    fn config_validates_url() {
        let config = ClientConfig::new(&Network::Testnet).unwrap();
        assert_eq!(config.url.host_str(), Some("s.altnet.rippletest.net"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        assert!(matches!(
            ClientConfig::new(&Network::Custom("not a url".into())),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::new(&Network::Custom("wss://xrplcluster.com".into())),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_setting_is_a_custom_url() {
        let Ok(network) = "mainnet-ish".parse::<Network>();
        assert_eq!(network, Network::Custom("mainnet-ish".into()));
        assert!(matches!(
            ClientConfig::new(&network),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn timeout_override() {
        let config = ClientConfig::new(&Network::Mainnet)
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
