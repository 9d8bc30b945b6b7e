//! Best-effort base64 decoding shared by VMess bodies and subscription blobs.
//!
//! Share links in the wild use every base64 flavour, so decoding tries, in order,
//! standard without padding, standard, URL-safe without padding and URL-safe.
//! The first variant that accepts the input wins.

use crate::constants::error_msg;
use crate::error::{ProtocolError, Result};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

// Non-zero trailing bits are accepted on decode.
const PADDED: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
    .with_decode_allow_trailing_bits(true);
const UNPADDED: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::RequireNone)
    .with_decode_allow_trailing_bits(true);

const STANDARD_NO_PAD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, UNPADDED);
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDED);
const URL_SAFE_NO_PAD: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, UNPADDED);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDED);

const ENGINES: [&GeneralPurpose; 4] = [&STANDARD_NO_PAD, &STANDARD, &URL_SAFE_NO_PAD, &URL_SAFE];

/// Decode `data` with the first base64 variant that accepts it.
///
/// Whitespace, including line breaks from wrapped blobs, is removed first.
///
/// # Errors
///
/// Returns [`ProtocolError::Base64DecodeError`] when the input is empty or no
/// variant decodes it.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ProtocolError::Base64DecodeError(
            error_msg::EMPTY_BASE64.to_string(),
        ));
    }

    ENGINES
        .iter()
        .find_map(|engine| engine.decode(compact.as_bytes()).ok())
        .ok_or_else(|| ProtocolError::Base64DecodeError(error_msg::INVALID_BASE64.to_string()))
}
