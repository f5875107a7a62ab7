//! The task capability contract and the per-cycle entry point.

use tracing::debug;

use crate::error::{Error, Result};
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;

/// A node in the execution tree.
///
/// `O` is the acting entity and `B` the blackboard; both are host-owned and
/// opaque to the engine except where a scoping decorator narrows the board.
/// Implementations are immutable after construction.
pub trait Task<O, B> {
    /// Execute a fresh cycle from the beginning.
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome>;

    /// Continue the cycle a prior suspension paused, consuming the frames
    /// this node and its descendants pushed on the way out.
    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome>;

    /// Deterministic shape fingerprint, computed once at construction.
    ///
    /// Two trees with equal fingerprints are assumed shape-compatible for
    /// resuming one another's continuations. Comparing a live tree against
    /// the fingerprint recorded with a persisted string is host policy.
    fn fingerprint(&self) -> u64;
}

/// Drive one invocation cycle: fresh when `saved` is absent, resumed from
/// the decoded continuation otherwise.
///
/// A malformed `saved` string fails before any task runs. After a resume,
/// the continuation must be fully consumed; leftovers mean the tree no
/// longer matches the string and surface as a structural mismatch.
pub fn run_or_resume<O, B>(
    task: &dyn Task<O, B>,
    owner: &mut O,
    board: &mut B,
    saved: Option<&str>,
) -> Result<Outcome> {
    match saved {
        None => {
            debug!(fingerprint = task.fingerprint(), "running fresh cycle");
            let outcome = task.run(owner, board)?;
            debug!(suspended = outcome.is_suspended(), "cycle settled");
            Ok(outcome)
        }
        Some(encoded) => {
            let mut restore = Restore::from_encoded(encoded)?;
            debug!(
                fingerprint = task.fingerprint(),
                frames = restore.remaining(),
                "resuming suspended cycle"
            );
            let outcome = task.resume(owner, board, &mut restore)?;
            if !restore.is_drained() {
                return Err(Error::mismatch(format!(
                    "{} unconsumed characters left after resume",
                    restore.remaining()
                )));
            }
            debug!(suspended = outcome.is_suspended(), "cycle settled");
            Ok(outcome)
        }
    }
}

/// Validate a popped child index against the live child count.
pub(crate) fn child_index(raw: i32, len: usize) -> Result<usize> {
    if raw < 0 || raw as usize >= len {
        return Err(Error::mismatch(format!(
            "child index {raw} is outside the live range 0..{len}"
        )));
    }
    Ok(raw as usize)
}
