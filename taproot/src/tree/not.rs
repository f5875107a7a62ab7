//! Inversion decorator.

use crate::error::Result;
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::Task;

/// Swaps Success and Fail. A suspension carries no settled verdict yet, so
/// it passes through untouched in both directions.
pub struct Not<O, B> {
    child: Box<dyn Task<O, B>>,
    fingerprint: u64,
}

impl<O, B> Not<O, B> {
    pub fn new(child: Box<dyn Task<O, B>>) -> Self {
        let fingerprint = fingerprint::decorated(fingerprint::NOT, child.fingerprint());
        Self { child, fingerprint }
    }
}

fn invert(outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Success => Outcome::Fail,
        Outcome::Fail => Outcome::Success,
        suspended @ Outcome::Suspended(_) => suspended,
    }
}

impl<O, B> Task<O, B> for Not<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        Ok(invert(self.child.run(owner, board)?))
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        Ok(invert(self.child.resume(owner, board, restore)?))
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

pub fn not<O: 'static, B: 'static>(child: Box<dyn Task<O, B>>) -> Box<dyn Task<O, B>> {
    Box::new(Not::new(child))
}
