//! AND composite: children run left to right until one fails or suspends.

use crate::error::Result;
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::{Task, child_index};

/// Succeeds when every child succeeds; the first failure short-circuits.
///
/// A suspending child stops iteration and its index is pushed above the
/// child's own frames, so resume can hand the remainder straight back to it.
pub struct Sequence<O, B> {
    children: Vec<Box<dyn Task<O, B>>>,
    fingerprint: u64,
}

impl<O, B> Sequence<O, B> {
    pub fn new(children: Vec<Box<dyn Task<O, B>>>) -> Self {
        let fingerprint = fingerprint::composite(
            fingerprint::SEQUENCE,
            children.iter().map(|child| child.fingerprint()),
        );
        Self {
            children,
            fingerprint,
        }
    }

    fn run_from(&self, owner: &mut O, board: &mut B, first: usize) -> Result<Outcome> {
        for index in first..self.children.len() {
            match self.children[index].run(owner, board)? {
                Outcome::Success => {}
                Outcome::Fail => return Ok(Outcome::Fail),
                Outcome::Suspended(mut stack) => {
                    stack.push_index(index as i32);
                    return Ok(Outcome::Suspended(stack));
                }
            }
        }
        Ok(Outcome::Success)
    }
}

impl<O, B> Task<O, B> for Sequence<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        self.run_from(owner, board, 0)
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        let index = child_index(restore.pop_int()?, self.children.len())?;
        match self.children[index].resume(owner, board, restore)? {
            Outcome::Fail => Ok(Outcome::Fail),
            // The suspended child settled; the rest runs fresh.
            Outcome::Success => self.run_from(owner, board, index + 1),
            Outcome::Suspended(mut stack) => {
                stack.push_index(index as i32);
                Ok(Outcome::Suspended(stack))
            }
        }
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

pub fn sequence<O: 'static, B: 'static>(
    children: Vec<Box<dyn Task<O, B>>>,
) -> Box<dyn Task<O, B>> {
    Box::new(Sequence::new(children))
}
