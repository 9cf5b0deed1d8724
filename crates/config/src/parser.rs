use crate::AppConfig;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load a configuration file, substituting `${VAR}` references from the
/// environment before parsing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    debug!("Config file content length: {} bytes", content.len());

    parse_config(&content)
}

/// Parse a configuration document from a string.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let substituted = substitute_env_vars(content)?;
    let config: AppConfig =
        serde_yaml::from_str(&substituted).context("Failed to parse YAML configuration")?;
    Ok(config)
}

/// Write a configuration document to disk as YAML.
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml =
        serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;
    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}

/// Replace every `${VAR}` occurrence with the value of the environment
/// variable `VAR`. A reference to an unset variable is an error rather than
/// an empty string, so typos surface at load time.
fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern");

    let mut result = String::with_capacity(content.len());
    let mut last = 0;
    for caps in pattern.captures_iter(content) {
        let whole = caps.get(0).expect("match");
        let name = &caps[1];
        let value = std::env::var(name)
            .with_context(|| format!("Environment variable not set: {}", name))?;
        result.push_str(&content[last..whole.start()]);
        result.push_str(&value);
        last = whole.end();
    }
    result.push_str(&content[last..]);
    Ok(result)
}
