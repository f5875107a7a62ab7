//! Data-dependent fan-out: one child invocation per derived element,
//! reattached across cycles by a stable key.

use std::collections::BTreeMap;

use tracing::warn;

use crate::codec::{Codec, MapOf, OptionOf, encode_to_string};
use crate::error::{Error, Result};
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::{ContinuationStack, Restore, StackCodec};
use crate::tree::task::Task;

/// An ad hoc [`crate::tree::parallel::Parallel`] whose membership comes from
/// the data: `split` derives one sub-board per element each cycle and
/// `key_of` names it durably.
///
/// The persisted frame maps every known key to either its open sub-stack or
/// a completion marker, so enumeration order does not matter, settled
/// elements are never re-invoked, and keys that first appear on a later
/// cycle start fresh. The whole node succeeds once every derived element
/// has; a failing element fails the round like a fixed parallel.
pub struct SplitInParallel<O, B, S, K, C>
where
    C: Codec<Value = K>,
{
    frame: MapOf<C, OptionOf<StackCodec>>,
    child: Box<dyn Task<O, S>>,
    split: Box<dyn Fn(&mut O, &B) -> Vec<S>>,
    key_of: Box<dyn Fn(&S) -> K>,
    fingerprint: u64,
}

impl<O, B, S, K, C> SplitInParallel<O, B, S, K, C>
where
    C: Codec<Value = K>,
    K: Ord,
{
    pub fn new(
        key_codec: C,
        child: Box<dyn Task<O, S>>,
        split: impl Fn(&mut O, &B) -> Vec<S> + 'static,
        key_of: impl Fn(&S) -> K + 'static,
    ) -> Self {
        let fingerprint = fingerprint::decorated(fingerprint::SPLIT, child.fingerprint());
        Self {
            frame: MapOf::new(key_codec, OptionOf(StackCodec)),
            child,
            split: Box::new(split),
            key_of: Box::new(key_of),
            fingerprint,
        }
    }

    /// One round over the derived collection, against whatever the previous
    /// round recorded per key.
    fn round(
        &self,
        owner: &mut O,
        board: &mut B,
        mut prior: BTreeMap<K, Option<Restore>>,
    ) -> Result<Outcome> {
        let elements = (self.split)(owner, board);
        let mut failed = false;
        let mut next: BTreeMap<K, Option<Restore>> = BTreeMap::new();
        let mut open = 0usize;
        for mut element in elements {
            let key = (self.key_of)(&element);
            if next.contains_key(&key) {
                warn!("duplicate split key; the later element replaces the earlier result");
            }
            let outcome = match prior.remove(&key) {
                // Settled in an earlier round; stays settled.
                Some(None) => {
                    next.insert(key, None);
                    continue;
                }
                Some(Some(mut sub)) => {
                    let outcome = self.child.resume(owner, &mut element, &mut sub)?;
                    if !sub.is_drained() {
                        return Err(Error::mismatch(format!(
                            "split branch left {} unconsumed characters",
                            sub.remaining()
                        )));
                    }
                    outcome
                }
                None => self.child.run(owner, &mut element)?,
            };
            match outcome {
                Outcome::Fail => failed = true,
                Outcome::Success => {
                    next.insert(key, None);
                }
                Outcome::Suspended(stack) => {
                    next.insert(key, Some(stack.into_restore()?));
                    open += 1;
                }
            }
        }
        if failed {
            return Ok(Outcome::Fail);
        }
        if open == 0 {
            return Ok(Outcome::Success);
        }
        let mut stack = ContinuationStack::new();
        stack.push_payload(encode_to_string(&self.frame, &next)?);
        Ok(Outcome::Suspended(stack))
    }
}

impl<O, B, S, K, C> Task<O, B> for SplitInParallel<O, B, S, K, C>
where
    C: Codec<Value = K>,
    K: Ord,
{
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        self.round(owner, board, BTreeMap::new())
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        let prior = restore.pop_with(&self.frame)?;
        if !restore.is_drained() {
            return Err(Error::contract(
                "all of a split's descendant frames live in its map frame; found trailing frames",
            ));
        }
        self.round(owner, board, prior)
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

pub fn split_in_parallel<O, B, S, K, C>(
    key_codec: C,
    child: Box<dyn Task<O, S>>,
    split: impl Fn(&mut O, &B) -> Vec<S> + 'static,
    key_of: impl Fn(&S) -> K + 'static,
) -> Box<dyn Task<O, B>>
where
    O: 'static,
    B: 'static,
    S: 'static,
    K: Ord + 'static,
    C: Codec<Value = K> + 'static,
{
    Box::new(SplitInParallel::new(key_codec, child, split, key_of))
}
