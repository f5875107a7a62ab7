//! OR composite: children run left to right until one succeeds or suspends.

use crate::error::Result;
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::{Task, child_index};

/// The dual of [`crate::tree::sequence::Sequence`]: the first success
/// short-circuits, failures fall through to the next child, and all children
/// failing fails the selector.
pub struct Selector<O, B> {
    children: Vec<Box<dyn Task<O, B>>>,
    fingerprint: u64,
}

impl<O, B> Selector<O, B> {
    pub fn new(children: Vec<Box<dyn Task<O, B>>>) -> Self {
        let fingerprint = fingerprint::composite(
            fingerprint::SELECTOR,
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
                Outcome::Success => return Ok(Outcome::Success),
                Outcome::Fail => {}
                Outcome::Suspended(mut stack) => {
                    stack.push_index(index as i32);
                    return Ok(Outcome::Suspended(stack));
                }
            }
        }
        Ok(Outcome::Fail)
    }
}

impl<O, B> Task<O, B> for Selector<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        self.run_from(owner, board, 0)
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        let index = child_index(restore.pop_int()?, self.children.len())?;
        match self.children[index].resume(owner, board, restore)? {
            Outcome::Success => Ok(Outcome::Success),
            // The suspended child settled; keep looking for a success.
            Outcome::Fail => self.run_from(owner, board, index + 1),
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

pub fn selector<O: 'static, B: 'static>(
    children: Vec<Box<dyn Task<O, B>>>,
) -> Box<dyn Task<O, B>> {
    Box::new(Selector::new(children))
}
