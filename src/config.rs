//! Xray client configuration compiled from a single [`Link`].
//!
//! The document has a fixed shape: one SOCKS inbound on loopback, the compiled proxy
//! outbound followed by a `direct` freedom outbound, and the default routing table.
//! Listener, log and tag values come from [`CompileOptions`].

use crate::constants::{defaults, error_msg, tag};
use crate::error::{ProtocolError, Result};
use crate::link::{Link, LinkProtocol, first_non_empty};
use crate::routing::{RoutingConfig, default_routing, with_outbound_tags};
use crate::transport::{StreamSettings, build_stream_settings};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Values of the compiled document that are not taken from the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Xray log level
    pub log_level: String,
    /// Address of the local SOCKS listener
    pub listen: String,
    /// Port of the local SOCKS listener
    pub socks_port: u16,
    /// Relay UDP through the SOCKS listener
    pub udp: bool,
    /// Tag of the compiled proxy outbound; empty means `proxy`
    pub proxy_tag: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            log_level: "warning".to_string(),
            listen: "127.0.0.1".to_string(),
            socks_port: 10808,
            udp: true,
            proxy_tag: tag::PROXY.to_string(),
        }
    }
}

/// Complete Xray configuration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XrayConfig {
    /// `log` section
    pub log: LogConfig,
    /// Local listeners
    pub inbounds: Vec<InboundConfig>,
    /// Proxy outbound followed by the direct fallback
    pub outbounds: Vec<OutboundConfig>,
    /// Routing table
    pub routing: RoutingConfig,
}

impl XrayConfig {
    /// Render the document as pretty-printed JSON, ready to hand to Xray.
    ///
    /// # Errors
    ///
    /// Returns `JsonParseError` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The compiled proxy outbound.
    pub fn proxy_outbound(&self) -> Option<&OutboundConfig> {
        self.outbounds.first()
    }
}

/// `log` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogConfig {
    /// Verbosity
    #[serde(skip_serializing_if = "String::is_empty")]
    pub loglevel: String,
}

/// A local listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundConfig {
    /// Listen port
    pub port: u16,
    /// Listen address
    pub listen: String,
    /// Inbound protocol
    pub protocol: String,
    /// SOCKS settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SocksInboundSettings>,
}

/// `settings` of the SOCKS inbound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SocksInboundSettings {
    /// Relay UDP
    pub udp: bool,
}

/// An outbound; `protocol` and `settings` come from [`OutboundSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundConfig {
    /// Protocol and its settings
    #[serde(flatten)]
    pub settings: OutboundSettings,
    /// Transport and security
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_settings: Option<StreamSettings>,
    /// Tag referenced by routing rules
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

impl OutboundConfig {
    /// Protocol name as written to the document.
    pub fn protocol(&self) -> &'static str {
        self.settings.protocol()
    }
}

/// Outbound settings, serialized as `"protocol": ..., "settings": {...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "protocol", content = "settings", rename_all = "lowercase")]
pub enum OutboundSettings {
    /// VLESS client
    Vless(VnextSettings<VlessUser>),
    /// VMess client
    Vmess(VnextSettings<VmessUser>),
    /// Direct connection
    Freedom(FreedomSettings),
}

impl OutboundSettings {
    /// Protocol name as written to the document.
    pub fn protocol(&self) -> &'static str {
        match self {
            OutboundSettings::Vless(_) => "vless",
            OutboundSettings::Vmess(_) => "vmess",
            OutboundSettings::Freedom(_) => "freedom",
        }
    }
}

/// `vnext` server list shared by VLESS and VMess
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VnextSettings<U> {
    /// Upstream servers
    pub vnext: Vec<ServerEntry<U>>,
}

/// One upstream server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEntry<U> {
    /// Server address
    pub address: String,
    /// Server port
    pub port: u16,
    /// Credentials
    pub users: Vec<U>,
}

/// VLESS user entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlessUser {
    /// UUID
    pub id: String,
    /// Encryption, `none` by default
    pub encryption: String,
    /// Flow control
    pub flow: String,
}

/// VMess user entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VmessUser {
    /// UUID
    pub id: String,
    /// Alter ID carried over from the link
    pub alter_id: AlterId,
    /// Cipher; always `auto`
    pub security: String,
}

/// Alter ID as carried by the link: numeric when it parses, text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AlterId {
    /// Numeric alter ID
    Number(u16),
    /// Non-numeric value passed through
    Text(String),
}

impl From<&str> for AlterId {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return AlterId::Number(0);
        }
        value
            .parse()
            .map(AlterId::Number)
            .unwrap_or_else(|_| AlterId::Text(value.to_string()))
    }
}

/// `settings` of the freedom outbound (always `{}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FreedomSettings {}

/// Compile `link` into an Xray configuration using [`CompileOptions::default`].
///
/// # Errors
///
/// Returns [`ProtocolError::MissingField`] when the address, port or uuid is missing.
///
/// # Example
///
/// ```rust
/// use vpn_link_xray::{build_xray_config, parse_link};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let link = parse_link("vless://11111111-1111-1111-1111-111111111111@example.com?security=tls&sni=example.com")?;
/// let config = build_xray_config(&link)?;
/// assert_eq!(config.outbounds[0].protocol(), "vless");
/// # Ok(())
/// # }
/// ```
pub fn build_xray_config(link: &Link) -> Result<XrayConfig> {
    build_xray_config_with(link, &CompileOptions::default())
}

/// Compile `link` into an Xray configuration with explicit options.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingField`] when the address, port or uuid is missing.
pub fn build_xray_config_with(link: &Link, options: &CompileOptions) -> Result<XrayConfig> {
    let missing = missing_fields(link);
    if !missing.is_empty() {
        warn!(protocol = %link.protocol, missing = ?missing, "refusing to compile incomplete link");
        return Err(ProtocolError::MissingField(format!(
            "{}: {}",
            error_msg::MISSING_REQUIRED,
            missing.join(", ")
        )));
    }

    let proxy_tag = first_non_empty(&[options.proxy_tag.as_str(), tag::PROXY]);
    let outbound = build_outbound(link, &proxy_tag);
    debug!(
        protocol = outbound.protocol(),
        address = %link.address,
        port = link.port,
        network = outbound.stream_settings.as_ref().map(|s| s.network.as_str()).unwrap_or_default(),
        security = ?outbound.stream_settings.as_ref().and_then(|s| s.security),
        "compiled proxy outbound"
    );

    let config = XrayConfig {
        log: LogConfig {
            loglevel: options.log_level.clone(),
        },
        inbounds: vec![InboundConfig {
            port: options.socks_port,
            listen: options.listen.clone(),
            protocol: "socks".to_string(),
            settings: Some(SocksInboundSettings { udp: options.udp }),
        }],
        outbounds: vec![
            outbound,
            OutboundConfig {
                settings: OutboundSettings::Freedom(FreedomSettings {}),
                stream_settings: None,
                tag: tag::DIRECT.to_string(),
            },
        ],
        routing: default_routing(),
    };

    Ok(with_outbound_tags(config, &proxy_tag))
}

fn missing_fields(link: &Link) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if link.address.is_empty() {
        missing.push("address");
    }
    if link.port == 0 {
        missing.push("port");
    }
    if link.uuid.is_empty() {
        missing.push("uuid");
    }
    missing
}

fn build_outbound(link: &Link, proxy_tag: &str) -> OutboundConfig {
    let settings = match link.protocol {
        LinkProtocol::VLess => OutboundSettings::Vless(VnextSettings {
            vnext: vec![ServerEntry {
                address: link.address.clone(),
                port: link.port,
                users: vec![VlessUser {
                    id: link.uuid.clone(),
                    encryption: first_non_empty(&[
                        link.encryption.as_str(),
                        defaults::VLESS_ENCRYPTION,
                    ]),
                    flow: link.flow.clone(),
                }],
            }],
        }),
        LinkProtocol::VMess => OutboundSettings::Vmess(VnextSettings {
            vnext: vec![ServerEntry {
                address: link.address.clone(),
                port: link.port,
                users: vec![VmessUser {
                    id: link.uuid.clone(),
                    alter_id: AlterId::from(link.encryption.as_str()),
                    security: defaults::VMESS_SECURITY.to_string(),
                }],
            }],
        }),
    };

    OutboundConfig {
        settings,
        stream_settings: Some(build_stream_settings(link)),
        tag: proxy_tag.to_string(),
    }
}
