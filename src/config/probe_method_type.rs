use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

use crate::probe::ProbeMethod;

/**
 * Deserialize the probe method. Unknown values fall back to `Get`.
 */
pub fn deserialize<'de, D>(deserializer: D) -> Result<ProbeMethod, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_str(ProbeMethodVisitor)
        .unwrap_or_default())
}

struct ProbeMethodVisitor;

impl<'de> Visitor<'de> for ProbeMethodVisitor {
    type Value = ProbeMethod;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an HTTP method, 'get' or 'head'")
    }

    fn visit_str<E>(self, value: &str) -> Result<ProbeMethod, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| de::Error::unknown_variant(value, ProbeMethod::NAMES))
    }
}
