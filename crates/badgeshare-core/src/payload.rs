//! Stateless-link payloads.
//!
//! A stateless link carries the whole configuration in its `data` query
//! parameter as base64 text. Decoding is forgiving about the forms links
//! take in the wild: padding may be missing, the URL-safe alphabet is
//! accepted, and a `+` that a query-string decoder turned into a space is
//! put back.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};

use crate::error::PayloadError;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Encode configuration text for a stateless link (standard alphabet, padded).
pub fn encode_payload(content: &str) -> String {
    STANDARD.encode(content.as_bytes())
}

/// Decode a stateless-link payload back into configuration text.
///
/// # Errors
///
/// Returns [`PayloadError::Base64`] if the data is not base64 in either
/// alphabet, or [`PayloadError::Utf8`] if it does not decode to UTF-8 text.
pub fn decode_payload(data: &str) -> Result<String, PayloadError> {
    let normalized: String = data
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let engine = if normalized.contains(['-', '_']) {
        &URL_SAFE_LENIENT
    } else {
        &STANDARD_LENIENT
    };

    let bytes = engine
        .decode(normalized.as_bytes())
        .map_err(|e| PayloadError::Base64 {
            reason: e.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|e| PayloadError::Utf8 {
        reason: e.to_string(),
    })
}
