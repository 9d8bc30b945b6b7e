//! Default traffic routing for compiled configurations.
//!
//! Xray evaluates rules top to bottom and the first match wins, so the proxied-domain
//! rule must stay ahead of the catch-all private-IP rule.

use crate::config::XrayConfig;
use crate::constants::tag;
use serde::Serialize;

/// Domains of the chat service that must go through the proxy.
const PROXIED_DOMAINS: [&str; 2] = ["discord.com", "discord.gg"];
/// Domains that always bypass the proxy.
const BYPASS_DOMAINS: [&str; 2] = ["yandex.ru", "vk.com"];
/// Private and local address ranges.
const PRIVATE_IPS: [&str; 1] = ["geoip:private"];

/// `routing` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    /// Domain matching strategy
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain_strategy: String,
    /// Ordered rules; first match wins
    pub rules: Vec<RoutingRule>,
}

/// One routing rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    /// Rule type, always `field`
    pub r#type: String,
    /// Domain matchers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    /// IP / CIDR / geoip matchers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip: Vec<String>,
    /// Port or port range
    #[serde(skip_serializing_if = "String::is_empty")]
    pub port: String,
    /// `tcp`, `udp` or both
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network: String,
    /// Outbound handling matched traffic
    pub outbound_tag: String,
}

impl RoutingRule {
    fn field(outbound_tag: &str) -> Self {
        RoutingRule {
            r#type: "field".to_string(),
            outbound_tag: outbound_tag.to_string(),
            ..RoutingRule::default()
        }
    }

    fn with_domains(mut self, domains: &[&str]) -> Self {
        self.domain = domains.iter().map(|d| d.to_string()).collect();
        self
    }

    fn with_ips(mut self, ips: &[&str]) -> Self {
        self.ip = ips.iter().map(|ip| ip.to_string()).collect();
        self
    }
}

/// Build the fixed three-rule routing table.
///
/// Each call returns a fresh value, so callers may modify it freely.
pub fn default_routing() -> RoutingConfig {
    RoutingConfig {
        domain_strategy: "AsIs".to_string(),
        rules: vec![
            RoutingRule::field(tag::PROXY).with_domains(&PROXIED_DOMAINS),
            RoutingRule::field(tag::DIRECT).with_domains(&BYPASS_DOMAINS),
            RoutingRule::field(tag::DIRECT).with_ips(&PRIVATE_IPS),
        ],
    }
}

impl RoutingConfig {
    /// Point every rule routed to the `proxy` placeholder at `proxy_tag`.
    pub fn retag_proxy(&mut self, proxy_tag: &str) {
        for rule in &mut self.rules {
            if rule.outbound_tag == tag::PROXY {
                rule.outbound_tag = proxy_tag.to_string();
            }
        }
    }
}

/// Rewrite the routing rules of `config` to target the outbound tagged `proxy_tag`.
pub fn with_outbound_tags(mut config: XrayConfig, proxy_tag: &str) -> XrayConfig {
    config.routing.retag_proxy(proxy_tag);
    config
}
