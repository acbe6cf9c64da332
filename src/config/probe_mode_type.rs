use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

use crate::probe::ProbeMode;

/**
 * Deserialize the probe mode. Unknown values fall back to `Preemptive`.
 */
pub fn deserialize<'de, D>(deserializer: D) -> Result<ProbeMode, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_str(ProbeModeVisitor)
        .unwrap_or_default())
}

struct ProbeModeVisitor;

impl<'de> Visitor<'de> for ProbeModeVisitor {
    type Value = ProbeMode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("one of 'preemptive' or 'challenge'")
    }

    fn visit_str<E>(self, value: &str) -> Result<ProbeMode, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| de::Error::unknown_variant(value, ProbeMode::NAMES))
    }
}
