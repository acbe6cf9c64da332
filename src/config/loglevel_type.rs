use serde::de::{self, Deserializer, Visitor};

use slog::Level;
use std::str::FromStr;
use std::{env, fmt};

use super::environment_type::EnvironmentType;
use super::ENVIRONMENT_VAR;

/**
 * Deserialize the log level from the configuration.
 *
 * An unparsable level is not an error: the level is then inferred from the
 * environment type (debug for development, warn otherwise).
 */
pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    match deserializer.deserialize_str(LogLevelVisitor) {
        Ok(level) => Ok(level),
        Err(_) => {
            let environment = env::var(ENVIRONMENT_VAR)
                .ok()
                .and_then(|v| EnvironmentType::from_str(&v).ok())
                .unwrap_or(EnvironmentType::production);
            Ok(match environment {
                EnvironmentType::development => Level::Debug,
                _ => Level::Warning,
            })
        }
    }
}

struct LogLevelVisitor;

impl<'de> Visitor<'de> for LogLevelVisitor {
    type Value = Level;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string representing a log level")
    }

    fn visit_str<E>(self, value: &str) -> Result<Level, E>
    where
        E: de::Error,
    {
        match value.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(de::Error::unknown_variant(
                value,
                &["trace", "debug", "info", "warn", "error", "critical"],
            )),
        }
    }
}
