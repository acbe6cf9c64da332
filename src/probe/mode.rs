use std::str::FromStr;

/**
 * How a probe presents credentials to the remote endpoint.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeMode {
    /**
     * Send `Authorization` with the first request.
     */
    #[default]
    Preemptive,
    /**
     * Send the first request anonymously and answer a `WWW-Authenticate: Basic`
     * challenge with one credentialed retry.
     */
    Challenge,
}

impl ProbeMode {
    pub const NAMES: &'static [&'static str] = &["preemptive", "challenge"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMode::Preemptive => "preemptive",
            ProbeMode::Challenge => "challenge",
        }
    }
}

impl FromStr for ProbeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preemptive" => Ok(ProbeMode::Preemptive),
            "challenge" => Ok(ProbeMode::Challenge),
            _ => Err(()),
        }
    }
}

/**
 * HTTP method used for probes. HEAD avoids transferring a body from
 * endpoints that honour it.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeMethod {
    #[default]
    Get,
    Head,
}

impl ProbeMethod {
    pub const NAMES: &'static [&'static str] = &["get", "head"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Get => "GET",
            ProbeMethod::Head => "HEAD",
        }
    }
}

impl FromStr for ProbeMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(ProbeMethod::Get),
            "head" => Ok(ProbeMethod::Head),
            _ => Err(()),
        }
    }
}
