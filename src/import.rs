//! Bulk import of pasted link text or subscription blobs.

use crate::constants::scheme;
use crate::decode::decode_base64;
use crate::error::ImportError;
use crate::link::Link;
use crate::parse_link;
use std::borrow::Cow;
use tracing::debug;

/// Extra decode passes allowed when the input is a base64-wrapped bundle of links.
const MAX_UNWRAP_PASSES: usize = 1;

/// Outcome of importing a text blob.
///
/// `links` keeps the order of valid lines, `errors` the order of failing ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportResult {
    /// Successfully parsed links
    pub links: Vec<Link>,
    /// Per-line failures
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    /// True when nothing was imported and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.errors.is_empty()
    }
}

/// Parse every link in `input`, one per line.
///
/// Blank lines and `#` comments are skipped. A line that fails to parse is recorded
/// with its 1-based line number and does not stop the rest of the batch. Input
/// without any `://` is first tried as a base64 subscription blob.
///
/// # Example
///
/// ```rust
/// use vpn_link_xray::parse_links_from_text;
///
/// let result = parse_links_from_text("# servers\nvless://id@example.com\nbogus://x");
/// assert_eq!(result.links.len(), 1);
/// assert_eq!(result.errors[0].line, 3);
/// ```
pub fn parse_links_from_text(input: &str) -> ImportResult {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ImportResult::default();
    }

    let mut text = Cow::Borrowed(trimmed);
    for _ in 0..MAX_UNWRAP_PASSES {
        if text.contains(scheme::SEPARATOR) {
            break;
        }
        match unwrap_subscription(&text) {
            Some(decoded) => text = Cow::Owned(decoded),
            None => break,
        }
    }

    let normalized = text.replace("\r\n", "\n");
    let mut result = ImportResult::default();

    for (idx, line) in normalized.split(['\n', '\r']).enumerate() {
        let clean = line.trim();
        if clean.is_empty() || clean.starts_with('#') {
            continue;
        }
        match parse_link(clean) {
            Ok(link) => result.links.push(link),
            Err(error) => {
                debug!(line = idx + 1, %error, "skipping link that failed to parse");
                result.errors.push(ImportError {
                    line: idx + 1,
                    error,
                });
            }
        }
    }

    debug!(
        links = result.links.len(),
        errors = result.errors.len(),
        "imported link text"
    );
    result
}

/// Decode a subscription blob, keeping it only if it now looks like links.
fn unwrap_subscription(blob: &str) -> Option<String> {
    let bytes = decode_base64(blob).ok()?;
    let decoded = String::from_utf8_lossy(&bytes).trim().to_string();
    if decoded.contains(scheme::SEPARATOR) {
        debug!(bytes = bytes.len(), "unwrapped base64 subscription blob");
        Some(decoded)
    } else {
        None
    }
}
