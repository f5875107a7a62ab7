//! The execution tree: leaves, composites, and decorators sharing one
//! suspend/resume protocol.
//!
//! Trees are immutable after construction and evaluated synchronously;
//! nothing here performs I/O or touches threads. The frame discipline is
//! structural: nodes push onto the continuation stack post-order on the way
//! out of a suspension and pop pre-order on the way back in, so an encoded
//! continuation replays the exact in-flight position on a matching tree.

pub mod leaf;
pub mod not;
pub mod outcome;
pub mod parallel;
pub mod retry;
pub mod scoped;
pub mod selector;
pub mod sequence;
pub mod split;
pub mod stack;
pub mod suspend_on_fail;
pub mod task;

mod fingerprint;

pub use leaf::{Action, Condition, action, condition};
pub use not::{Not, not};
pub use outcome::Outcome;
pub use parallel::{Parallel, parallel};
pub use retry::{Retry, retry};
pub use scoped::{Scoped, scoped};
pub use selector::{Selector, selector};
pub use sequence::{Sequence, sequence};
pub use split::{SplitInParallel, split_in_parallel};
pub use stack::{ContinuationStack, Frame, Restore};
pub use suspend_on_fail::{SuspendOnFail, suspend_on_fail};
pub use task::{Task, run_or_resume};
