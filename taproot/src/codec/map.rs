//! Ordered key/value maps.

use std::collections::BTreeMap;

use crate::codec::{Codec, DecodeCursor, SMALL_INT_MAX, SmallInt};
use crate::error::{Error, Result};

/// Entry count as a [`SmallInt`], then each key/value pair in map order.
///
/// Backed by `BTreeMap` so encodings are deterministic for a given content;
/// decoding reproduces the associations, not the original insertion order.
pub struct MapOf<K, V> {
    key: K,
    value: V,
}

impl<K, V> MapOf<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> Codec for MapOf<K, V>
where
    K: Codec,
    K::Value: Ord,
    V: Codec,
{
    type Value = BTreeMap<K::Value, V::Value>;

    fn encode(&self, value: &Self::Value, out: &mut String) -> Result<()> {
        if value.len() > SMALL_INT_MAX as usize {
            return Err(Error::range(format!(
                "map of {} entries exceeds the size prefix domain",
                value.len()
            )));
        }
        SmallInt.encode(&(value.len() as i32), out)?;
        for (k, v) in value {
            self.key.encode(k, out)?;
            self.value.encode(v, out)?;
        }
        Ok(())
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<Self::Value> {
        let size = SmallInt.decode(cursor)?;
        if size < 0 {
            return Err(Error::decoding(format!("negative map size {size}")));
        }
        let mut result = BTreeMap::new();
        for _ in 0..size {
            let key = self.key.decode(cursor)?;
            let value = self.value.decode(cursor)?;
            result.insert(key, value);
        }
        Ok(result)
    }
}
