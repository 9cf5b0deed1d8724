use crate::AppConfig;
use alloy_primitives::Address;

/// Outcome of validating a configuration document.
///
/// Errors make the config unusable; warnings are findings the operator
/// should look at but that do not block startup.
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate a configuration document, collecting every finding rather than
/// stopping at the first.
pub fn validate_config(config: &AppConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.chain.factory_address == Address::ZERO {
        report.error("chain.factory_address is the zero address; set it to the deployed factory");
    }

    match config.chain.rpc_url.scheme() {
        "http" | "https" | "ws" | "wss" => {}
        other => report.error(format!("chain.rpc_url has unsupported scheme: {}", other)),
    }

    if config.orders.order_expiration_secs == 0 {
        report.error("orders.order_expiration_secs must be positive");
    } else if config.orders.order_expiration_secs < 60 {
        report.warn(format!(
            "orders.order_expiration_secs is very short ({}s); fee quotes will expire almost immediately",
            config.orders.order_expiration_secs
        ));
    }

    if !matches!(config.logging.format.as_str(), "pretty" | "json" | "compact") {
        report.error(format!(
            "logging.format must be one of pretty/json/compact, got: {}",
            config.logging.format
        ));
    }

    report
}
