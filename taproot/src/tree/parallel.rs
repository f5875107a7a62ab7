//! Fan-out composite: every child is evaluated each round, failure wins.

use std::collections::BTreeMap;

use crate::codec::{MapOf, SmallInt, encode_to_string};
use crate::error::{Error, Result};
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::{ContinuationStack, Restore, StackCodec};
use crate::tree::task::{Task, child_index};

/// Logical concurrency over a fixed child list, evaluated sequentially
/// within one call.
///
/// Each round runs (or resumes) its children without short-circuiting. Any
/// failure in the round fails the whole node and abandons sibling
/// suspensions. Otherwise the still-suspended children are bundled into a
/// single index-keyed map frame; later rounds resume only those, so settled
/// children are never re-invoked.
pub struct Parallel<O, B> {
    children: Vec<Box<dyn Task<O, B>>>,
    fingerprint: u64,
}

fn frame_codec() -> MapOf<SmallInt, StackCodec> {
    MapOf::new(SmallInt, StackCodec)
}

impl<O, B> Parallel<O, B> {
    pub fn new(children: Vec<Box<dyn Task<O, B>>>) -> Self {
        let fingerprint = fingerprint::composite(
            fingerprint::PARALLEL,
            children.iter().map(|child| child.fingerprint()),
        );
        Self {
            children,
            fingerprint,
        }
    }

    fn settle_round(&self, round: Vec<(usize, Outcome)>) -> Result<Outcome> {
        if round.iter().any(|(_, outcome)| *outcome == Outcome::Fail) {
            return Ok(Outcome::Fail);
        }
        let mut open = BTreeMap::new();
        for (index, outcome) in round {
            if let Outcome::Suspended(stack) = outcome {
                open.insert(index as i32, stack.into_restore()?);
            }
        }
        if open.is_empty() {
            return Ok(Outcome::Success);
        }
        let mut stack = ContinuationStack::new();
        stack.push_payload(encode_to_string(&frame_codec(), &open)?);
        Ok(Outcome::Suspended(stack))
    }
}

impl<O, B> Task<O, B> for Parallel<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        let mut round = Vec::with_capacity(self.children.len());
        for (index, child) in self.children.iter().enumerate() {
            round.push((index, child.run(owner, board)?));
        }
        self.settle_round(round)
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        let saved = restore.pop_with(&frame_codec())?;
        if !restore.is_drained() {
            return Err(Error::contract(
                "all of a parallel's descendant frames live in its map frame; found trailing frames",
            ));
        }
        let mut round = Vec::with_capacity(saved.len());
        for (raw, mut sub) in saved {
            let index = child_index(raw, self.children.len())?;
            let outcome = self.children[index].resume(owner, board, &mut sub)?;
            if !sub.is_drained() {
                return Err(Error::mismatch(format!(
                    "branch {index} left {} unconsumed characters",
                    sub.remaining()
                )));
            }
            round.push((index, outcome));
        }
        self.settle_round(round)
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

pub fn parallel<O: 'static, B: 'static>(
    children: Vec<Box<dyn Task<O, B>>>,
) -> Box<dyn Task<O, B>> {
    Box::new(Parallel::new(children))
}
