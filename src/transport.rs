//! Transport and security sub-configuration of an outbound (`streamSettings`).
//!
//! The network type selects at most one of the WebSocket, gRPC or HTTP/2 blocks and the
//! normalized security mode selects at most one of the TLS or Reality blocks.

use crate::constants::defaults;
use crate::link::{Link, first_non_empty, split_csv};
use serde::Serialize;
use std::collections::BTreeMap;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Security layer applied over the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityMode {
    /// TLS (also used for legacy `xtls` links)
    Tls,
    /// REALITY
    Reality,
}

/// Map a link's security string to the mode Xray understands.
///
/// `tls` and `xtls` become TLS, `reality` stays REALITY, anything else means no security block.
pub fn normalize_security(value: &str) -> Option<SecurityMode> {
    match value {
        "tls" | "xtls" => Some(SecurityMode::Tls),
        "reality" => Some(SecurityMode::Reality),
        _ => None,
    }
}

/// `streamSettings` of an outbound
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSettings {
    /// Network type (tcp, ws, grpc, h2, ...)
    pub network: String,
    /// Normalized security mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityMode>,
    /// TLS parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_settings: Option<TlsSettings>,
    /// REALITY parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reality_settings: Option<RealitySettings>,
    /// WebSocket transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WebSocketSettings>,
    /// gRPC transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_settings: Option<GrpcSettings>,
    /// HTTP/2 transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_settings: Option<HttpSettings>,
}

/// `tlsSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    /// SNI
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name: String,
    /// Skip certificate verification
    #[serde(skip_serializing_if = "is_false")]
    pub allow_insecure: bool,
    /// ALPN list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alpn: Vec<String>,
    /// uTLS fingerprint
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
}

/// `realitySettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealitySettings {
    /// SNI
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name: String,
    /// uTLS fingerprint
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
}

/// `wsSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebSocketSettings {
    /// Request path
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Extra request headers
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// `grpcSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcSettings {
    /// gRPC service name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_name: String,
}

/// `httpSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HttpSettings {
    /// Request paths
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    /// Host names
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,
}

/// Derive the `streamSettings` block for `link`.
pub fn build_stream_settings(link: &Link) -> StreamSettings {
    let security = normalize_security(&link.security);
    let mut settings = StreamSettings {
        network: first_non_empty(&[link.transport.as_str(), defaults::NETWORK]),
        security,
        ..StreamSettings::default()
    };

    match settings.network.as_str() {
        "ws" => {
            let mut headers = BTreeMap::new();
            if !link.host.is_empty() {
                headers.insert("Host".to_string(), link.host.clone());
            }
            settings.ws_settings = Some(WebSocketSettings {
                path: link.path.clone(),
                headers,
            });
        }
        "grpc" => {
            settings.grpc_settings = Some(GrpcSettings {
                service_name: link.service_name.clone(),
            });
        }
        "h2" | "http" | "http2" => {
            settings.http_settings = Some(HttpSettings {
                path: split_csv(&link.path),
                host: split_csv(&link.host),
            });
        }
        _ => {}
    }

    match security {
        Some(SecurityMode::Tls) => settings.tls_settings = build_tls_settings(link),
        Some(SecurityMode::Reality) => {
            settings.reality_settings = Some(RealitySettings {
                server_name: link.sni.clone(),
                fingerprint: link.fingerprint.clone(),
            });
        }
        None => {}
    }

    settings
}

/// TLS parameters for `link`, or `None` when the link carries none of them.
///
/// An empty block with verification enabled adds nothing, so it is left out.
pub fn build_tls_settings(link: &Link) -> Option<TlsSettings> {
    if link.sni.is_empty()
        && link.alpn.is_empty()
        && link.fingerprint.is_empty()
        && !link.allow_insecure
    {
        return None;
    }
    Some(TlsSettings {
        server_name: link.sni.clone(),
        allow_insecure: link.allow_insecure,
        alpn: link.alpn.clone(),
        fingerprint: link.fingerprint.clone(),
    })
}
