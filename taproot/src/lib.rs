//! Cooperative task-tree engine with interruptible, resumable cycles.
//!
//! A host builds an immutable tree of tasks once and then drives it in
//! invocation cycles. A cycle either settles (success/failure) or suspends;
//! a suspended cycle hands back a stack of continuation frames that encodes,
//! as one compact string, exactly where execution paused. The host persists
//! that string however it likes and feeds it back on the next cycle to
//! continue from the same point, no matter how many cycles elapsed in
//! between. The architecture enforces a strict separation:
//!
//! - **[`codec`]**: Pure, stateless string codecs. Composable by
//!   concatenation: decoding consumes exactly the characters encoding
//!   produced. No I/O, no engine types.
//! - **[`tree`]**: The execution engine (leaves, composites, decorators) and
//!   the continuation-frame protocol. Single-threaded, no I/O; suspension is
//!   a returned value, never an OS-level yield.
//!
//! Storage of the persisted string, the domain logic inside leaf tasks, and
//! the owner/blackboard context objects all belong to the host.

pub mod codec;
pub mod error;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tree;

pub use error::{Error, Result};
pub use tree::outcome::Outcome;
pub use tree::stack::{ContinuationStack, Restore};
pub use tree::task::{Task, run_or_resume};
