//! Blackboard narrowing with the derived scope persisted across cycles.

use crate::codec::{Codec, OptionOf};
use crate::error::Result;
use crate::tree::fingerprint;
use crate::tree::outcome::Outcome;
use crate::tree::stack::Restore;
use crate::tree::task::Task;

/// Derives a narrowed board for its child and keeps that exact value alive
/// across suspensions.
///
/// `init` may decline to produce a scope, which fails the node. When the
/// child suspends, the current scope value is encoded above the child's
/// frames; resume restores it verbatim instead of re-deriving, so the child
/// sees the same scope even if `init` would now answer differently (or not
/// at all). Only an absent persisted value falls back to `init`.
pub struct Scoped<O, B, S, C>
where
    C: Codec<Value = S>,
{
    codec: OptionOf<C>,
    init: Box<dyn Fn(&mut O, &mut B) -> Option<S>>,
    child: Box<dyn Task<O, S>>,
    fingerprint: u64,
}

impl<O, B, S, C> Scoped<O, B, S, C>
where
    C: Codec<Value = S>,
{
    pub fn new(
        codec: C,
        init: impl Fn(&mut O, &mut B) -> Option<S> + 'static,
        child: Box<dyn Task<O, S>>,
    ) -> Self {
        let fingerprint = fingerprint::decorated(fingerprint::SCOPED, child.fingerprint());
        Self {
            codec: OptionOf(codec),
            init: Box::new(init),
            child,
            fingerprint,
        }
    }

    fn retain_scope(&self, outcome: Outcome, scope: &S) -> Result<Outcome> {
        match outcome {
            Outcome::Suspended(mut stack) => {
                let mut payload = String::new();
                self.codec.encode_present(scope, &mut payload)?;
                stack.push_payload(payload);
                Ok(Outcome::Suspended(stack))
            }
            settled => Ok(settled),
        }
    }
}

impl<O, B, S, C> Task<O, B> for Scoped<O, B, S, C>
where
    C: Codec<Value = S>,
{
    fn run(&self, owner: &mut O, board: &mut B) -> Result<Outcome> {
        let Some(mut scope) = (self.init)(owner, board) else {
            return Ok(Outcome::Fail);
        };
        let outcome = self.child.run(owner, &mut scope)?;
        self.retain_scope(outcome, &scope)
    }

    fn resume(&self, owner: &mut O, board: &mut B, restore: &mut Restore) -> Result<Outcome> {
        let persisted = restore.pop_with(&self.codec)?;
        let revived = match persisted {
            Some(scope) => Some(scope),
            None => (self.init)(owner, board),
        };
        let Some(mut scope) = revived else {
            return Ok(Outcome::Fail);
        };
        let outcome = self.child.resume(owner, &mut scope, restore)?;
        self.retain_scope(outcome, &scope)
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

pub fn scoped<O, B, S, C>(
    codec: C,
    init: impl Fn(&mut O, &mut B) -> Option<S> + 'static,
    child: Box<dyn Task<O, S>>,
) -> Box<dyn Task<O, B>>
where
    O: 'static,
    B: 'static,
    S: 'static,
    C: Codec<Value = S> + 'static,
{
    Box::new(Scoped::new(codec, init, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Text;
    use crate::test_support::scripted;
    use crate::tree::leaf::Action;

    #[test]
    fn an_absent_scope_fails_the_node() {
        let tree = Scoped::new(
            Text,
            |_: &mut (), _: &mut ()| None::<String>,
            scripted(vec![Outcome::Success]),
        );
        assert_eq!(tree.run(&mut (), &mut ()).expect("run"), Outcome::Fail);
    }

    #[test]
    fn the_child_runs_against_the_derived_board() {
        let child = Action::new(|_: &mut (), scope: &mut String| {
            if scope == "narrow" {
                Outcome::Success
            } else {
                Outcome::Fail
            }
        });
        let tree = Scoped::new(
            Text,
            |_: &mut (), wide: &mut String| Some(wide[..6].to_string()),
            Box::new(child),
        );
        let mut board = "narrow and wide".to_string();
        assert_eq!(tree.run(&mut (), &mut board).expect("run"), Outcome::Success);
    }

    #[test]
    fn suspension_pushes_the_scope_above_the_child_frames() {
        let tree = Scoped::new(
            Text,
            |_: &mut (), _: &mut ()| Some("whatevs".to_string()),
            scripted(vec![Outcome::suspended()]),
        );
        let Outcome::Suspended(stack) = tree.run(&mut (), &mut ()).expect("run") else {
            panic!("expected suspension");
        };
        let mut restore = stack.into_restore().expect("restore");
        let scope = restore
            .pop_with(&OptionOf(Text))
            .expect("scope frame");
        assert_eq!(scope.as_deref(), Some("whatevs"));
        assert!(restore.is_drained());
    }

    #[test]
    fn resume_prefers_the_persisted_scope_over_init() {
        let tree = Scoped::new(
            Text,
            |_: &mut (), _: &mut ()| Some("rederived".to_string()),
            Box::new(Action::new(|_: &mut (), scope: &mut String| {
                if scope == "persisted" {
                    Outcome::Success
                } else {
                    Outcome::Fail
                }
            })),
        );
        let mut stack = crate::tree::stack::ContinuationStack::new();
        let mut payload = String::new();
        OptionOf(Text)
            .encode_present(&"persisted".to_string(), &mut payload)
            .expect("encode scope");
        stack.push_payload(payload);

        let mut restore = stack.into_restore().expect("restore");
        assert_eq!(
            tree.resume(&mut (), &mut (), &mut restore).expect("resume"),
            Outcome::Success
        );
    }

    #[test]
    fn resume_falls_back_to_init_when_the_scope_is_absent() {
        let tree = Scoped::new(
            Text,
            |_: &mut (), _: &mut ()| Some("rederived".to_string()),
            Box::new(Action::new(|_: &mut (), scope: &mut String| {
                if scope == "rederived" {
                    Outcome::Success
                } else {
                    Outcome::Fail
                }
            })),
        );
        let mut stack = crate::tree::stack::ContinuationStack::new();
        stack.push_payload("-".to_string());

        let mut restore = stack.into_restore().expect("restore");
        assert_eq!(
            tree.resume(&mut (), &mut (), &mut restore).expect("resume"),
            Outcome::Success
        );
    }
}
