//! Normalized link model shared by both schemes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Link schemes the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkProtocol {
    /// `vless://`
    VLess,
    /// `vmess://`
    VMess,
}

impl LinkProtocol {
    /// Lowercase protocol name, as used by Xray outbounds.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkProtocol::VLess => "vless",
            LinkProtocol::VMess => "vmess",
        }
    }
}

impl fmt::Display for LinkProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A share link normalized into one shape regardless of scheme.
///
/// Only `protocol` and `raw` are guaranteed meaningful; every other field may be
/// empty, in which case consumers fall back to the protocol default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link scheme
    pub protocol: LinkProtocol,
    /// Display label (VLESS fragment / VMess `ps`)
    pub name: String,
    /// Server address
    pub address: String,
    /// Server port
    pub port: u16,
    /// User ID (UUID)
    pub uuid: String,
    /// VLESS encryption, or VMess alter ID carried through unchanged
    pub encryption: String,
    /// Security mode (tls, xtls, reality, none)
    pub security: String,
    /// Network type, `tcp` unless the link names another
    pub transport: String,
    /// SNI (Server Name Indication)
    pub sni: String,
    /// Host header
    pub host: String,
    /// Path (ws/h2)
    pub path: String,
    /// TLS fingerprint
    pub fingerprint: String,
    /// Flow control (VLESS)
    pub flow: String,
    /// ALPN list
    pub alpn: Vec<String>,
    /// gRPC service name
    pub service_name: String,
    /// Skip certificate verification
    pub allow_insecure: bool,
    /// The exact text the link was parsed from
    pub raw: String,
}

impl Link {
    /// Name, or `address:port` when the link carried no label.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("{}:{}", self.address, self.port)
        } else {
            self.name.clone()
        }
    }
}

/// Split a comma list, trimming items and dropping empty ones.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// First value that is not blank, or an empty string.
pub(crate) fn first_non_empty(values: &[&str]) -> String {
    values
        .iter()
        .find(|value| !value.trim().is_empty())
        .map(|value| value.to_string())
        .unwrap_or_default()
}
