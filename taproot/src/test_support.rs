//! Test-only helpers for scripting deterministic task outcomes.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::Result;
use crate::tree::leaf::Action;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::Task;

/// A leaf that replays the given outcomes in order, repeating the final one
/// once the script is spent.
pub fn scripted<O: 'static, B: 'static>(outcomes: Vec<Outcome>) -> Box<dyn Task<O, B>> {
    assert!(!outcomes.is_empty(), "a script needs at least one outcome");
    let queue = RefCell::new(VecDeque::from(outcomes));
    Box::new(Action::new(move |_: &mut O, _: &mut B| {
        let mut queue = queue.borrow_mut();
        if queue.len() > 1 {
            queue.pop_front().expect("script is non-empty")
        } else {
            queue.front().expect("script is non-empty").clone()
        }
    }))
}

pub fn always_succeeds<O: 'static, B: 'static>() -> Box<dyn Task<O, B>> {
    scripted(vec![Outcome::success()])
}

pub fn always_fails<O: 'static, B: 'static>() -> Box<dyn Task<O, B>> {
    scripted(vec![Outcome::fail()])
}

pub fn always_suspends<O: 'static, B: 'static>() -> Box<dyn Task<O, B>> {
    scripted(vec![Outcome::suspended()])
}

struct Counting<O, B> {
    calls: Rc<Cell<u32>>,
    inner: Box<dyn Task<O, B>>,
}

impl<O, B> Task<O, B> for Counting<O, B> {
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        self.calls.set(self.calls.get() + 1);
        self.inner.run(owner, board)
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        self.calls.set(self.calls.get() + 1);
        self.inner.resume(owner, board, restore)
    }

    fn fingerprint(&self) -> u64 {
        self.inner.fingerprint()
    }
}

/// Wrap a task so every invocation (run or resume) bumps a shared counter.
pub fn counting<O: 'static, B: 'static>(
    calls: &Rc<Cell<u32>>,
    inner: Box<dyn Task<O, B>>,
) -> Box<dyn Task<O, B>> {
    Box::new(Counting {
        calls: Rc::clone(calls),
        inner,
    })
}

/// Encode a suspended outcome's continuation the way a host would persist
/// it. Panics on settled outcomes.
pub fn saved_string(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Suspended(stack) => stack.encode().expect("stack is encodable"),
        settled => panic!("outcome is not suspended: {settled:?}"),
    }
}
