//! Bounded retry decorator: failures are retried within a single cycle.

use tracing::trace;

use crate::error::{Error, Result};
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::Task;

/// Re-runs a failing child until it succeeds, suspends, or the attempt
/// budget is spent (then fails).
///
/// A suspension during attempt `k` persists `k` above the child's frames,
/// so the remaining budget carries across cycles.
pub struct Retry<O, B> {
    max_attempts: u32,
    child: Box<dyn Task<O, B>>,
    fingerprint: u64,
}

impl<O, B> Retry<O, B> {
    pub fn new(max_attempts: u32, child: Box<dyn Task<O, B>>) -> Self {
        let fingerprint = fingerprint::decorated(fingerprint::RETRY, child.fingerprint());
        Self {
            max_attempts,
            child,
            fingerprint,
        }
    }

    fn attempt_from(&self, owner: &mut O, board: &mut B, first: i32) -> Result<Outcome> {
        for attempt in first..=self.max_attempts as i32 {
            trace!(attempt, max = self.max_attempts, "retry attempt");
            match self.child.run(owner, board)? {
                Outcome::Success => return Ok(Outcome::Success),
                Outcome::Fail => {}
                Outcome::Suspended(mut stack) => {
                    stack.push_index(attempt);
                    return Ok(Outcome::Suspended(stack));
                }
            }
        }
        Ok(Outcome::Fail)
    }
}

impl<O, B> Task<O, B> for Retry<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        self.attempt_from(owner, board, 1)
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        let attempt = restore.pop_int()?;
        if attempt < 1 || attempt > self.max_attempts as i32 {
            return Err(Error::mismatch(format!(
                "attempt counter {attempt} is outside 1..={}",
                self.max_attempts
            )));
        }
        match self.child.resume(owner, board, restore)? {
            Outcome::Success => Ok(Outcome::Success),
            // The restored attempt failed; the rest of the budget runs fresh.
            Outcome::Fail => self.attempt_from(owner, board, attempt + 1),
            Outcome::Suspended(mut stack) => {
                stack.push_index(attempt);
                Ok(Outcome::Suspended(stack))
            }
        }
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

pub fn retry<O: 'static, B: 'static>(
    max_attempts: u32,
    child: Box<dyn Task<O, B>>,
) -> Box<dyn Task<O, B>> {
    Box::new(Retry::new(max_attempts, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{counting, scripted};
    use std::cell::Cell;
    use std::rc::Rc;

    fn fails_then_succeeds(failures: usize) -> Box<dyn Task<(), ()>> {
        let mut script = vec![Outcome::Fail; failures];
        script.push(Outcome::Success);
        script.push(Outcome::Fail);
        scripted(script)
    }

    #[test]
    fn retry_succeeds_iff_failures_stay_under_the_budget() {
        let three = Retry::new(3, fails_then_succeeds(3));
        assert_eq!(three.run(&mut (), &mut ()).expect("run"), Outcome::Fail);

        let four = Retry::new(4, fails_then_succeeds(3));
        assert_eq!(four.run(&mut (), &mut ()).expect("run"), Outcome::Success);
    }

    #[test]
    fn exhaustion_spends_exactly_the_budget() {
        let calls = Rc::new(Cell::new(0u32));
        let child = counting(&calls, scripted(vec![Outcome::Fail]));
        let tree = Retry::new(3, child);
        assert_eq!(tree.run(&mut (), &mut ()).expect("run"), Outcome::Fail);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn suspension_pauses_the_loop_and_keeps_the_budget() {
        // Fail, suspend, then (after resuming) fail once more and succeed on
        // the final attempt of the original budget.
        let child = scripted(vec![
            Outcome::Fail,
            Outcome::suspended(),
            Outcome::Fail,
            Outcome::Success,
            Outcome::Fail,
        ]);
        let tree = Retry::new(3, child);

        let outcome = tree.run(&mut (), &mut ()).expect("run");
        let Outcome::Suspended(stack) = outcome else {
            panic!("expected suspension");
        };
        let mut restore = stack.into_restore().expect("restore");
        assert_eq!(
            tree.resume(&mut (), &mut (), &mut restore).expect("resume"),
            Outcome::Success
        );
    }

    #[test]
    fn stale_attempt_counter_is_a_structural_mismatch() {
        use crate::tree::stack::ContinuationStack;

        let tree = Retry::new(2, scripted::<(), ()>(vec![Outcome::Success]));
        let mut stack = ContinuationStack::new();
        stack.push_index(7);
        let mut restore = stack.into_restore().expect("restore");
        let err = tree
            .resume(&mut (), &mut (), &mut restore)
            .expect_err("stale counter");
        assert!(matches!(err, Error::StructuralMismatch(_)));
    }
}
