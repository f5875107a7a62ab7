//! Failure back-pressure: a failing subtree yields instead of failing.

use crate::error::Result;
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::Task;

/// Converts a child failure into a suspension that carries no child frames:
/// the failed attempt's partial progress is discarded and the child restarts
/// from scratch on the next cycle. Success and genuine suspensions pass
/// through unchanged, keeping the child's frames.
pub struct SuspendOnFail<O, B> {
    child: Box<dyn Task<O, B>>,
    fingerprint: u64,
}

impl<O, B> SuspendOnFail<O, B> {
    pub fn new(child: Box<dyn Task<O, B>>) -> Self {
        let fingerprint =
            fingerprint::decorated(fingerprint::SUSPEND_ON_FAIL, child.fingerprint());
        Self { child, fingerprint }
    }
}

fn absorb_failure(outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Fail => Outcome::suspended(),
        other => other,
    }
}

impl<O, B> Task<O, B> for SuspendOnFail<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        Ok(absorb_failure(self.child.run(owner, board)?))
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        // A drained restore means the last cycle ended in an absorbed
        // failure; the child starts over. Remaining frames belong to a
        // genuine suspension inside the child.
        let outcome = if restore.is_drained() {
            self.child.run(owner, board)?
        } else {
            self.child.resume(owner, board, restore)?
        };
        Ok(absorb_failure(outcome))
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

pub fn suspend_on_fail<O: 'static, B: 'static>(
    child: Box<dyn Task<O, B>>,
) -> Box<dyn Task<O, B>> {
    Box::new(SuspendOnFail::new(child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scripted;
    use crate::tree::stack::ContinuationStack;

    #[test]
    fn failure_becomes_a_frameless_suspension() {
        let tree = SuspendOnFail::new(scripted::<(), ()>(vec![Outcome::Fail]));
        match tree.run(&mut (), &mut ()).expect("run") {
            Outcome::Suspended(stack) => assert!(stack.is_empty()),
            settled => panic!("expected suspension, got {settled:?}"),
        }
    }

    #[test]
    fn success_and_genuine_suspension_pass_through() {
        let tree = SuspendOnFail::new(scripted::<(), ()>(vec![Outcome::Success]));
        assert_eq!(tree.run(&mut (), &mut ()).expect("run"), Outcome::Success);

        let tree = SuspendOnFail::new(scripted::<(), ()>(vec![Outcome::suspended()]));
        assert!(tree.run(&mut (), &mut ()).expect("run").is_suspended());
    }

    #[test]
    fn resume_with_a_drained_restore_restarts_the_child() {
        // Fail on the first cycle, succeed on the restart.
        let tree = SuspendOnFail::new(scripted::<(), ()>(vec![Outcome::Fail, Outcome::Success]));
        let outcome = tree.run(&mut (), &mut ()).expect("run");
        assert!(outcome.is_suspended());

        let mut restore = ContinuationStack::new().into_restore().expect("restore");
        assert_eq!(
            tree.resume(&mut (), &mut (), &mut restore).expect("resume"),
            Outcome::Success
        );
    }

    #[test]
    fn repeated_failures_keep_yielding() {
        let tree = SuspendOnFail::new(scripted::<(), ()>(vec![Outcome::Fail]));
        let mut restore = ContinuationStack::new().into_restore().expect("restore");
        let outcome = tree
            .resume(&mut (), &mut (), &mut restore)
            .expect("resume");
        match outcome {
            Outcome::Suspended(stack) => assert!(stack.is_empty()),
            settled => panic!("expected suspension, got {settled:?}"),
        }
    }
}
