//! Configuration for Optionbook
//!
//! One YAML document with three sections: where the chain boundary points
//! (`chain`), how order quotes are parameterized (`orders`), and how the
//! process logs (`logging`). Loading performs `${VAR}` environment
//! substitution before parsing; see [`parser`]. [`validator`] produces a
//! report of errors and warnings without aborting on the first finding.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use url::Url;

pub mod parser;
pub mod validator;

pub use parser::{load_config, parse_config, save_config};
pub use validator::{validate_config, ValidationReport};

/// Root configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chain boundary settings.
    pub chain: ChainConfig,
    /// Order quoting settings.
    #[serde(default)]
    pub orders: OrdersConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the option factory lives and how far back to scan for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint of the node the provider implementation talks to.
    pub rpc_url: Url,
    /// Address of the option factory contract whose creation events define
    /// the catalog.
    pub factory_address: Address,
    /// First block of the event scan. The factory's deployment block is the
    /// natural value; 0 scans from genesis.
    #[serde(default)]
    pub genesis_block: u64,
}

/// Order quoting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Horizon, in seconds from now, used as the expiration parameter of
    /// maker/taker fee quotes for limit orders.
    #[serde(default = "default_order_expiration_secs")]
    pub order_expiration_secs: u64,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            order_expiration_secs: default_order_expiration_secs(),
        }
    }
}

fn default_order_expiration_secs() -> u64 {
    // One day, matching the relayer default for resting orders.
    86_400
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format: "pretty", "json", or "compact".
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Default level filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// A complete configuration with placeholder chain settings, suitable as
    /// the starting point written by `optionbook init`.
    pub fn generate_default() -> Self {
        Self {
            chain: ChainConfig {
                rpc_url: Url::parse("http://localhost:8545").expect("static url"),
                factory_address: Address::ZERO,
                genesis_block: 0,
            },
            orders: OrdersConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_complete() {
        let cfg = AppConfig::generate_default();
        assert_eq!(cfg.orders.order_expiration_secs, 86_400);
        assert_eq!(cfg.logging.format, "pretty");
        assert_eq!(cfg.chain.genesis_block, 0);
    }

    #[test]
    fn test_default_config_round_trips() {
        let cfg = AppConfig::generate_default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let back: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.chain.factory_address, cfg.chain.factory_address);
        assert_eq!(back.orders.order_expiration_secs, cfg.orders.order_expiration_secs);
    }
}
