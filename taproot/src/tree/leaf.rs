//! Leaf nodes: effectful actions and pure conditions.

use crate::error::{Error, Result};
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::Task;

/// A leaf wrapping arbitrary effectful decision logic.
///
/// An action may yield [`Outcome::suspended`]; since it is then the
/// innermost frame of the continuation, resuming simply runs it again.
pub struct Action<O, B> {
    behavior: Box<dyn Fn(&mut O, &mut B) -> Outcome>,
}

impl<O, B> Action<O, B> {
    pub fn new(behavior: impl Fn(&mut O, &mut B) -> Outcome + 'static) -> Self {
        Self {
            behavior: Box::new(behavior),
        }
    }
}

impl<O, B> Task<O, B> for Action<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        Ok((self.behavior)(owner, board))
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        if !restore.is_drained() {
            return Err(Error::contract(
                "actions are the innermost frame; their restore must arrive drained",
            ));
        }
        self.run(owner, board)
    }

    fn fingerprint(&self) -> u64 {
        fingerprint::ACTION
    }
}

/// A pure boolean test. Settles every cycle; never suspends.
pub struct Condition<O, B> {
    test: Box<dyn Fn(&O, &B) -> bool>,
}

impl<O, B> Condition<O, B> {
    pub fn new(test: impl Fn(&O, &B) -> bool + 'static) -> Self {
        Self {
            test: Box::new(test),
        }
    }
}

impl<O, B> Task<O, B> for Condition<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        if (self.test)(owner, board) {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::Fail)
        }
    }

    fn resume(&self, _owner: &mut O, _board: &mut B, _restore: &mut Restore) -> Result<Outcome> {
        Err(Error::contract(
            "conditions never suspend and cannot be resumed",
        ))
    }

    fn fingerprint(&self) -> u64 {
        fingerprint::CONDITION
    }
}

pub fn action<O: 'static, B: 'static>(
    behavior: impl Fn(&mut O, &mut B) -> Outcome + 'static,
) -> Box<dyn Task<O, B>> {
    Box::new(Action::new(behavior))
}

pub fn condition<O: 'static, B: 'static>(
    test: impl Fn(&O, &B) -> bool + 'static,
) -> Box<dyn Task<O, B>> {
    Box::new(Condition::new(test))
}
