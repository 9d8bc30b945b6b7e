//! VLESS link parser
//!
//! URI format (RFC 3986): `vless://<uuid>@<address>[:<port>][?<query>][#<name>]`
//!
//! **Required**: a user-info part (`uuid@`, which may be empty) and `address`. The port defaults to 443 when omitted.
//!
//! **Query parameters** (`application/x-www-form-urlencoded`, first value wins): `encryption`,
//! `security`, `type` (alias `transport`, default `tcp`), `sni`, `host`, `path`, `fp`, `flow`,
//! `alpn` (comma list), `serviceName`, `allowInsecure` (`1` means true).
//!
//! **Fragment**: percent-decoded into the display name; kept verbatim if it does not decode.

use crate::LinkParser;
use crate::constants::{defaults, error_msg, scheme};
use crate::error::{ProtocolError, Result};
use crate::link::{Link, LinkProtocol, first_non_empty, split_csv};
use std::borrow::Cow;
use std::collections::HashMap;
use url::Url;

/// VLESS link parser
#[derive(Debug, Clone, Copy, Default)]
pub struct VLess;

impl LinkParser for VLess {
    const SCHEME: &'static str = scheme::VLESS;

    fn parse(link: &str) -> Result<Link> {
        if !scheme::has_prefix(link, Self::SCHEME) {
            return Err(ProtocolError::InvalidFormat(format!(
                "Link must start with {}",
                Self::SCHEME
            )));
        }

        let parsed = Url::parse(link)?;

        if !has_user_info(&link[Self::SCHEME.len()..]) {
            return Err(ProtocolError::InvalidFormat(
                error_msg::MISSING_UUID.to_string(),
            ));
        }
        let uuid = decode_or_raw(parsed.username());

        let address = parsed
            .host_str()
            .map(|host| host.trim_start_matches('[').trim_end_matches(']'))
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ProtocolError::InvalidFormat(error_msg::MISSING_HOST.to_string()))?
            .to_string();
        let port = parsed.port().unwrap_or(defaults::VLESS_PORT);

        let mut params: HashMap<String, String> = HashMap::new();
        for (key, value) in parsed.query_pairs() {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        let param = |key: &str| params.get(key).map(String::as_str).unwrap_or_default();

        Ok(Link {
            protocol: LinkProtocol::VLess,
            name: parsed.fragment().map(decode_or_raw).unwrap_or_default(),
            address,
            port,
            uuid,
            encryption: param("encryption").to_string(),
            security: param("security").to_string(),
            transport: first_non_empty(&[param("type"), param("transport"), defaults::NETWORK]),
            sni: param("sni").to_string(),
            host: param("host").to_string(),
            path: param("path").to_string(),
            fingerprint: param("fp").to_string(),
            flow: param("flow").to_string(),
            alpn: split_csv(param("alpn")),
            service_name: param("serviceName").to_string(),
            allow_insecure: param("allowInsecure") == "1",
            raw: link.to_string(),
        })
    }
}

/// True when the authority of `body` (the link without its scheme) has a `user@` part.
///
/// An empty user-info (`vless://@host`) still counts; the compiler rejects the empty uuid.
fn has_user_info(body: &str) -> bool {
    let end = body.find(['/', '?', '#']).unwrap_or(body.len());
    body[..end].contains('@')
}

/// Percent-decode `value`, falling back to the text as given.
fn decode_or_raw(value: &str) -> String {
    urlencoding::decode(value)
        .unwrap_or(Cow::Borrowed(value))
        .into_owned()
}
