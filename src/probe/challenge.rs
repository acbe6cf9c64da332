/**
 * `WWW-Authenticate` parsing, just enough to find a Basic challenge and its realm.
 */
use reqwest::header::{HeaderMap, WWW_AUTHENTICATE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicChallenge {
    pub realm: Option<String>,
}

/**
 * Looks for a Basic challenge across every `WWW-Authenticate` header of a response.
 */
pub fn find_basic_challenge(headers: &HeaderMap) -> Option<BasicChallenge> {
    headers
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_basic_challenge)
}

/**
 * Parses a single header value which may hold several comma separated
 * challenges, e.g. `Bearer realm="api", Basic realm="files", charset="UTF-8"`.
 *
 * @return The first Basic challenge found, or `None`.
 */
pub fn parse_basic_challenge(value: &str) -> Option<BasicChallenge> {
    let mut rest = value;
    let mut found: Option<BasicChallenge> = None;

    loop {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            return found;
        }

        let token_end = rest
            .find(|c: char| c == '=' || c == ',' || c.is_whitespace())
            .unwrap_or(rest.len());
        let token = &rest[..token_end];
        let after = rest[token_end..].trim_start();

        if let Some(param) = after.strip_prefix('=') {
            let (param_value, remainder) = read_param_value(param.trim_start());
            if let Some(challenge) = found.as_mut() {
                if challenge.realm.is_none() && token.eq_ignore_ascii_case("realm") {
                    challenge.realm = Some(param_value);
                }
            }
            rest = remainder;
        } else {
            // a new auth-scheme starts; the Basic one, if any, is complete
            if found.is_some() {
                return found;
            }
            if token.eq_ignore_ascii_case("basic") {
                found = Some(BasicChallenge { realm: None });
            }
            rest = after;
        }
    }
}

fn read_param_value(input: &str) -> (String, &str) {
    if let Some(quoted) = input.strip_prefix('"') {
        let mut value = String::new();
        let mut chars = quoted.char_indices();
        while let Some((idx, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        value.push(escaped);
                    }
                }
                '"' => return (value, &quoted[idx + 1..]),
                _ => value.push(c),
            }
        }
        (value, "")
    } else {
        let end = input
            .find(|c: char| c == ',' || c.is_whitespace())
            .unwrap_or(input.len());
        (input[..end].to_string(), &input[end..])
    }
}
