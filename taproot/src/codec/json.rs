//! serde bridge: persist any serde-friendly host type without a hand-written
//! codec, at the cost of a denser format's compactness.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{Codec, DecodeCursor, Text};
use crate::error::{Error, Result};

/// A [`Text`]-wrapped `serde_json` document.
///
/// Intended for host scope types handed to the scoping decorators; the
/// engine's own frames never use it.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Codec for Json<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn encode(&self, value: &T, out: &mut String) -> Result<()> {
        let document = serde_json::to_string(value)
            .map_err(|err| Error::range(format!("value is not serializable as JSON: {err}")))?;
        Text.encode(&document, out)
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<T> {
        let document = Text.decode(cursor)?;
        serde_json::from_str(&document)
            .map_err(|err| Error::decoding(format!("invalid JSON document: {err}")))
    }
}
