use crate::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// Request headers for remote playlist fetches, passed in query strings as
/// base64url-encoded JSON objects.
pub struct HeaderCodec;

impl HeaderCodec {
    /// Decode a base64url JSON object into a validated header map.
    pub fn decode(encoded: &str) -> Result<HeaderMap> {
        let json_bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| Error::InvalidHeaderEncoding(e.to_string()))?;

        let pairs: HashMap<String, String> = serde_json::from_slice(&json_bytes)
            .map_err(|e| Error::InvalidHeaderEncoding(e.to_string()))?;

        let mut headers = HeaderMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidHeaderEncoding(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| Error::InvalidHeaderEncoding(format!("{}: {}", name, e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Encode name/value pairs for use in a query string.
    pub fn encode(headers: &HashMap<String, String>) -> Result<String> {
        let json =
            serde_json::to_vec(headers).map_err(|e| Error::InvalidHeaderEncoding(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(&json))
    }

    /// Decode an optional parameter, returning an empty map if absent.
    pub fn decode_optional(encoded: Option<&str>) -> Result<HeaderMap> {
        match encoded {
            Some(s) if !s.is_empty() => Self::decode(s),
            _ => Ok(HeaderMap::new()),
        }
    }
}
