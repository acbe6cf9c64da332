/**
 * Define `EnvironmentType` enum and implements various traits for it.
 *
 * The `EnvironmentType` enum represents different types of environments:
 * - `development` (also aliased as 'dev')
 * - `staging` (also aliased as 'stg')
 * - `production` (also aliased as 'prod')
 *
 * Anything else falls back to `production`.
 */
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum EnvironmentType {
    development,
    staging,
    production,
}

impl FromStr for EnvironmentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(EnvironmentType::development),
            "staging" | "stg" => Ok(EnvironmentType::staging),
            _ => Ok(EnvironmentType::production),
        }
    }
}

impl EnvironmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentType::development => "development",
            EnvironmentType::staging => "staging",
            EnvironmentType::production => "production",
        }
    }

    /**
     * The log level used when none is configured.
     */
    pub fn default_log_level(&self) -> &'static str {
        match self {
            EnvironmentType::development => "debug",
            EnvironmentType::staging | EnvironmentType::production => "warn",
        }
    }
}

impl<'de> Deserialize<'de> for EnvironmentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(EnvironmentType::from_str(&s).unwrap_or(EnvironmentType::production))
    }
}
