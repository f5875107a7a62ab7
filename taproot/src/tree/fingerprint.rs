//! Shape fingerprints for detecting tree drift between cycles.
//!
//! A fingerprint captures structure, not behavior: all actions share one
//! constant and all conditions another, since their closures cannot be
//! inspected. Composites weight each child by its position; decorators fold
//! the child in through a fixed multiplier. Everything wraps on overflow so
//! the result is deterministic across platforms.

pub(crate) const ACTION: u64 = 0x04d3_9f31;
pub(crate) const CONDITION: u64 = 0x0221_78cd;
pub(crate) const SEQUENCE: u64 = 0x0269_bbc1;
pub(crate) const SELECTOR: u64 = 0x031f_0a8b;
pub(crate) const PARALLEL: u64 = 0x02e9_55e3;
pub(crate) const NOT: u64 = 0x0174_e80f;
pub(crate) const RETRY: u64 = 0x01c6_2d51;
pub(crate) const SUSPEND_ON_FAIL: u64 = 0x0353_9d07;
pub(crate) const SCOPED: u64 = 0x0172_22cb;
pub(crate) const SPLIT: u64 = 0x05a1_43b9;

const CHILD_WEIGHT: u64 = 0x022d_fba9;

/// Fold an ordered child list into a composite seed; child `i` carries
/// weight `i + 1` so reorderings change the result.
pub(crate) fn composite(seed: u64, children: impl Iterator<Item = u64>) -> u64 {
    children.enumerate().fold(seed, |acc, (i, fp)| {
        acc.wrapping_add((i as u64 + 1).wrapping_mul(fp))
    })
}

/// Fold a single wrapped child into a decorator seed.
pub(crate) fn decorated(seed: u64, child: u64) -> u64 {
    seed.wrapping_add(CHILD_WEIGHT.wrapping_mul(child))
}
