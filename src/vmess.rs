//! VMess link parser
//!
//! Link format: `vmess://base64(JSON)`. The body may use any of the base64 variants
//! accepted by [`decode_base64`](crate::decode_base64); whitespace is stripped first.
//!
//! ## JSON fields
//!
//! `v`, `ps` (name), `add` (address), `port`, `id` (UUID), `aid` (alter ID), `net`
//! (network, default `tcp`), `type`, `host`, `path`, `tls` (security), `sni`, `alpn`
//! (comma list), `fp` (fingerprint).
//!
//! `port`, `aid`, and `v` are accepted as either number or string in JSON. Missing keys
//! are treated as empty. The port must parse as a u16.

use crate::LinkParser;
use crate::constants::{defaults, error_msg, scheme};
use crate::decode::decode_base64;
use crate::error::{ProtocolError, Result};
use crate::link::{Link, LinkProtocol, first_non_empty, split_csv};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a JSON string or number into its string form (e.g. `443` or `"443"`).
fn deserialize_str_or_num<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Str(String),
        Num(i64),
    }
    match Option::<StrOrNum>::deserialize(d)? {
        None => Ok(String::new()),
        Some(StrOrNum::Str(s)) => Ok(s),
        Some(StrOrNum::Num(n)) => Ok(n.to_string()),
    }
}

/// Deserializes a JSON string, treating `null` as empty.
fn deserialize_null_as_empty<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// VMess JSON body with its short wire keys
///
/// `null` values are read as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VMessPayload {
    /// Format version (usually "2")
    #[serde(deserialize_with = "deserialize_str_or_num")]
    pub v: String,
    /// Remarks/description
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub ps: String,
    /// Server address
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub add: String,
    /// Server port
    #[serde(deserialize_with = "deserialize_str_or_num")]
    pub port: String,
    /// User ID (UUID)
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub id: String,
    /// Alter ID
    #[serde(deserialize_with = "deserialize_str_or_num")]
    pub aid: String,
    /// Network type (tcp, ws, h2, grpc, ...)
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub net: String,
    /// Header type
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub r#type: String,
    /// Host header
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub host: String,
    /// Path
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub path: String,
    /// TLS setting (tls, none)
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub tls: String,
    /// SNI (Server Name Indication)
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub sni: String,
    /// ALPN setting
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub alpn: String,
    /// Fingerprint
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub fp: String,
}

impl VMessPayload {
    /// Decode the body of a `vmess://` link (without the scheme).
    ///
    /// # Errors
    ///
    /// Returns `Base64DecodeError` when no base64 variant applies and
    /// `JsonParseError` when the decoded bytes are not a JSON object.
    pub fn decode(body: &str) -> Result<Self> {
        let bytes = decode_base64(body)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// VMess link parser
#[derive(Debug, Clone, Copy, Default)]
pub struct VMess;

impl LinkParser for VMess {
    const SCHEME: &'static str = scheme::VMESS;

    fn parse(link: &str) -> Result<Link> {
        if !scheme::has_prefix(link, Self::SCHEME) {
            return Err(ProtocolError::InvalidFormat(format!(
                "Link must start with {}",
                Self::SCHEME
            )));
        }

        let payload = VMessPayload::decode(&link[Self::SCHEME.len()..])?;

        let port: u16 = payload.port.trim().parse().map_err(|e| {
            ProtocolError::InvalidField(format!("{}: {}", error_msg::INVALID_PORT, e))
        })?;

        Ok(Link {
            protocol: LinkProtocol::VMess,
            name: payload.ps,
            address: payload.add,
            port,
            uuid: payload.id,
            encryption: payload.aid,
            security: payload.tls,
            transport: first_non_empty(&[payload.net.as_str(), defaults::NETWORK]),
            sni: payload.sni,
            host: payload.host,
            path: payload.path,
            fingerprint: payload.fp,
            flow: String::new(),
            alpn: split_csv(&payload.alpn),
            service_name: String::new(),
            allow_insecure: false,
            raw: link.to_string(),
        })
    }
}
