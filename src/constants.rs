//! Shared constants for link schemes, compiled document defaults and error messages.

/// Link URI scheme prefixes (lowercase, with `://`).
pub mod scheme {
    /// VMess: `vmess://`
    pub const VMESS: &str = "vmess://";
    /// VLESS: `vless://`
    pub const VLESS: &str = "vless://";
    /// Scheme separator; its presence marks text as plain links rather than a blob.
    pub const SEPARATOR: &str = "://";

    /// Case-insensitive check that `link` starts with `scheme`.
    pub(crate) fn has_prefix(link: &str, scheme: &str) -> bool {
        link.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    }
}

/// Defaults applied while parsing links.
pub mod defaults {
    /// Port used when a VLESS authority has no explicit port.
    pub const VLESS_PORT: u16 = 443;
    /// Network type used when a link does not name one.
    pub const NETWORK: &str = "tcp";
    /// VLESS user encryption when the link leaves it empty.
    pub const VLESS_ENCRYPTION: &str = "none";
    /// VMess user security; never derived from the link.
    pub const VMESS_SECURITY: &str = "auto";
}

/// Outbound tags referenced by the routing table.
pub mod tag {
    /// Placeholder tag of the compiled proxy outbound.
    pub const PROXY: &str = "proxy";
    /// Tag of the fixed freedom fallback outbound.
    pub const DIRECT: &str = "direct";
}

/// Common error message fragments.
pub mod error_msg {
    /// VLESS link without user-info.
    pub const MISSING_UUID: &str = "missing uuid";
    /// Link authority without a host.
    pub const MISSING_HOST: &str = "missing host";
    /// Empty base64 input.
    pub const EMPTY_BASE64: &str = "empty base64 data";
    /// None of the base64 variants decoded the input.
    pub const INVALID_BASE64: &str = "invalid base64 data";
    /// Invalid port value.
    pub const INVALID_PORT: &str = "Invalid port";
    /// Compile-time check on address, port and uuid.
    pub const MISSING_REQUIRED: &str = "missing required link fields";
}
