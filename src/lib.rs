//! # VPN Link Xray
//!
//! Imports VLESS and VMess share links and compiles them into Xray client configurations.
//!
//! ## Pipeline
//!
//! 1. [`parse_links_from_text`] splits pasted text (or a base64 subscription blob) into
//!    lines and parses each with [`parse_link`], collecting per-line errors.
//! 2. [`build_xray_config`] turns one [`Link`] into an [`XrayConfig`]: a local SOCKS
//!    inbound, the proxy outbound with its `streamSettings`, a `direct` fallback and the
//!    default routing table.
//!
//! Everything is synchronous and free of I/O; the caller decides where the document goes.
//!
//! ## Supported links
//!
//! - **[VLess]** (`vless://uuid@host[:port]?query#name`), port 443 when omitted
//! - **[VMess]** (`vmess://base64(JSON)`), any of four base64 variants
//!
//! Scheme prefixes are case-insensitive. Unknown schemes yield
//! [`ProtocolError::UnsupportedProtocol`].
//!
//! ## Example
//!
//! ```rust
//! use vpn_link_xray::{build_xray_config, parse_links_from_text};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = "vless://11111111-1111-1111-1111-111111111111@example.com:443?security=tls&type=ws&path=%2Fws#MyServer";
//! let imported = parse_links_from_text(text);
//! let config = build_xray_config(&imported.links[0])?;
//! let json = config.to_json_pretty()?;
//! assert!(json.contains("\"wsSettings\""));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod constants;
mod decode;
mod error;
mod import;
mod link;
mod routing;
mod transport;
mod vless;
mod vmess;


pub use config::{
    AlterId, CompileOptions, FreedomSettings, InboundConfig, LogConfig, OutboundConfig,
    OutboundSettings, ServerEntry, SocksInboundSettings, VlessUser, VmessUser, VnextSettings,
    XrayConfig, build_xray_config, build_xray_config_with,
};
pub use decode::decode_base64;
pub use error::{ErrorKind, ImportError, ProtocolError, Result};
pub use import::{ImportResult, parse_links_from_text};
pub use link::{Link, LinkProtocol, split_csv};
pub use routing::{RoutingConfig, RoutingRule, default_routing, with_outbound_tags};
pub use transport::{
    GrpcSettings, HttpSettings, RealitySettings, SecurityMode, StreamSettings, TlsSettings,
    WebSocketSettings, build_stream_settings, build_tls_settings, normalize_security,
};
pub use vless::VLess;
pub use vmess::{VMess, VMessPayload};

/// A parser for one link scheme
pub trait LinkParser {
    /// Scheme prefix handled by this parser, e.g. `vless://`
    const SCHEME: &'static str;

    /// Parse a link of this scheme into a [`Link`]
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the link is malformed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vpn_link_xray::{LinkParser, VLess};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let link = VLess::parse("vless://uuid@example.com:8443#home")?;
    /// assert_eq!(link.port, 8443);
    /// # Ok(())
    /// # }
    /// ```
    fn parse(link: &str) -> Result<Link>;
}

/// Parse one share link, dispatching on its scheme.
///
/// # Errors
///
/// Returns [`ProtocolError::UnsupportedProtocol`] for schemes other than
/// `vless://` and `vmess://`, or the scheme parser's error.
///
/// # Example
///
/// ```rust
/// use vpn_link_xray::{LinkProtocol, parse_link};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let link = parse_link("vless://uuid@example.com?type=grpc&serviceName=svc")?;
/// assert_eq!(link.protocol, LinkProtocol::VLess);
/// assert_eq!(link.port, 443);
/// # Ok(())
/// # }
/// ```
pub fn parse_link(raw: &str) -> Result<Link> {
    use crate::constants::scheme;

    if scheme::has_prefix(raw, VLess::SCHEME) {
        VLess::parse(raw)
    } else if scheme::has_prefix(raw, VMess::SCHEME) {
        VMess::parse(raw)
    } else {
        let scheme_name = raw.split(scheme::SEPARATOR).next().unwrap_or(raw);
        Err(ProtocolError::UnsupportedProtocol(format!(
            "Unknown scheme: {}",
            scheme_name
        )))
    }
}
