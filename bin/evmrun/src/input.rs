//! Hex decoding of command-line input.

use alloy_primitives::{Bytes, hex};
use thiserror::Error;
use tracing::warn;

/// Malformed command-line input.
#[derive(Debug, Error)]
pub(crate) enum InputError {
    /// A hex argument did not decode.
    #[error("invalid hex in --{field}: {source}")]
    InvalidHex {
        /// Name of the offending flag.
        field: &'static str,
        /// Decoder error.
        source: hex::FromHexError,
    },
}

/// Decode a hex argument. A leading `0x` is accepted.
pub(crate) fn decode_hex(field: &'static str, input: &str) -> Result<Bytes, InputError> {
    hex::decode(input)
        .map(Bytes::from)
        .map_err(|source| InputError::InvalidHex { field, source })
}

/// Decode a hex argument under the chosen policy.
///
/// With `strict` the error is returned. Otherwise it is logged and decoding
/// falls back to empty input.
pub(crate) fn decode_or_empty(
    field: &'static str,
    input: &str,
    strict: bool,
) -> Result<Bytes, InputError> {
    match decode_hex(field, input) {
        Ok(bytes) => Ok(bytes),
        Err(err) if strict => Err(err),
        Err(err) => {
            warn!(%err, input, "continuing with empty input");
            Ok(Bytes::new())
        }
    }
}
