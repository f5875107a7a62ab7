//! Presence-tagged optional values.

use crate::codec::{Codec, DecodeCursor};
use crate::error::{Error, Result};

const PRESENT: char = '+';
const ABSENT: char = '-';

/// `'-'` for an absent value, `'+'` followed by the inner encoding otherwise.
pub struct OptionOf<C>(pub C);

impl<C: Codec> OptionOf<C> {
    /// Encode a value that is known to be present.
    pub fn encode_present(&self, value: &C::Value, out: &mut String) -> Result<()> {
        out.push(PRESENT);
        self.0.encode(value, out)
    }
}

impl<C: Codec> Codec for OptionOf<C> {
    type Value = Option<C::Value>;

    fn encode(&self, value: &Option<C::Value>, out: &mut String) -> Result<()> {
        match value {
            None => {
                out.push(ABSENT);
                Ok(())
            }
            Some(inner) => self.encode_present(inner, out),
        }
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<Option<C::Value>> {
        match cursor.take_one()? {
            ABSENT => Ok(None),
            PRESENT => Ok(Some(self.0.decode(cursor)?)),
            tag => Err(Error::decoding(format!(
                "needs '+' or '-' to decide presence, found {tag:?}"
            ))),
        }
    }
}
