//! Composable string codecs for persisted state.
//!
//! Codecs are pure and stateless. Encoding appends characters to a growing
//! buffer; decoding consumes characters from a [`DecodeCursor`]. The core
//! contract is exactness: decoding a fragment consumes precisely the
//! characters that encoding produced, so concatenated fragments decode
//! independently in sequence with no delimiters between them.

mod cursor;
mod json;
mod map;
mod optional;
mod primitives;

pub use cursor::DecodeCursor;
pub use json::Json;
pub use map::MapOf;
pub use optional::OptionOf;
pub use primitives::{Glyph, SMALL_INT_MAX, SMALL_INT_MIN, SmallInt, Text, WideInt};

use crate::error::{Error, Result};

/// A stateless encode/decode pair for one value type.
///
/// Implementations must round-trip: decoding the fragment produced by
/// `encode` yields an equal value, and consumes exactly that fragment.
pub trait Codec {
    type Value;

    /// Append the encoded form of `value` to `out`.
    fn encode(&self, value: &Self::Value, out: &mut String) -> Result<()>;

    /// Consume one encoded value from the cursor.
    fn decode(&self, cursor: &mut DecodeCursor) -> Result<Self::Value>;
}

/// Encode a single value into a fresh fragment.
pub fn encode_to_string<C: Codec>(codec: &C, value: &C::Value) -> Result<String> {
    let mut out = String::new();
    codec.encode(value, &mut out)?;
    Ok(out)
}

/// Decode a value from a complete fragment, rejecting trailing characters.
pub fn decode_from_str<C: Codec>(codec: &C, encoded: &str) -> Result<C::Value> {
    let mut cursor = DecodeCursor::new(encoded);
    let value = codec.decode(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(Error::decoding(format!(
            "{} trailing characters after a complete value",
            cursor.remaining()
        )));
    }
    Ok(value)
}
