//! Continuation frames: the LIFO buffer built on the way out of a
//! suspension and the read-only cursor consumed on the way back in.

use tracing::trace;

use crate::codec::{Codec, DecodeCursor, SmallInt, Text, decode_from_str};
use crate::error::{Error, Result};

/// One entry on the continuation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A chosen child index or attempt counter, in the small-integer domain.
    Index(i32),
    /// A payload already encoded by the codec that will later decode it.
    /// Self-delimiting, so it embeds into the rendered stack verbatim.
    Payload(String),
}

/// Owned LIFO buffer of frames.
///
/// Nodes push post-order while a suspension propagates upward: a node
/// appends its frame only after its descendants appended theirs, which is
/// exactly the reverse of the order resume consumes them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuationStack {
    frames: Vec<Frame>,
}

impl ContinuationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_index(&mut self, index: i32) {
        trace!(index, depth = self.frames.len(), "push index frame");
        self.frames.push(Frame::Index(index));
    }

    pub fn push_payload(&mut self, payload: String) {
        trace!(chars = payload.chars().count(), depth = self.frames.len(), "push payload frame");
        self.frames.push(Frame::Payload(payload));
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in pop order (most recently pushed first), with no prefix.
    fn render(&self) -> Result<String> {
        let mut out = String::new();
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Index(index) => SmallInt.encode(index, &mut out)?,
                Frame::Payload(payload) => out.push_str(payload),
            }
        }
        Ok(out)
    }

    /// Freeze into the cursor view a resuming tree consumes.
    pub fn into_restore(self) -> Result<Restore> {
        Ok(Restore::over(&self.render()?))
    }

    /// Encode into the single string the host persists between cycles.
    pub fn encode(&self) -> Result<String> {
        let mut out = String::new();
        Text.encode(&self.render()?, &mut out)?;
        Ok(out)
    }
}

/// Read-only view over an encoded continuation, consumed front to back.
///
/// Frames are not self-describing; each node knows which kind it pushed and
/// pops accordingly. A restore must be fully drained by the tree that
/// produced it.
#[derive(Debug)]
pub struct Restore {
    cursor: DecodeCursor,
}

impl Restore {
    fn over(rendered: &str) -> Self {
        Self {
            cursor: DecodeCursor::new(rendered),
        }
    }

    /// Decode the host-persisted string produced by
    /// [`ContinuationStack::encode`]. Malformed input fails here, before any
    /// task runs.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        decode_from_str(&StackCodec, encoded)
    }

    /// Pop an index/counter frame.
    pub fn pop_int(&mut self) -> Result<i32> {
        if self.is_drained() {
            return Err(Error::contract(
                "expected an integer frame, but the continuation is drained",
            ));
        }
        SmallInt.decode(&mut self.cursor)
    }

    /// Pop a payload frame with the codec that encoded it.
    pub fn pop_with<C: Codec>(&mut self, codec: &C) -> Result<C::Value> {
        if self.is_drained() {
            return Err(Error::contract(
                "expected a payload frame, but the continuation is drained",
            ));
        }
        codec.decode(&mut self.cursor)
    }

    pub fn is_drained(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Unconsumed characters left in the view.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    fn unread(&self) -> String {
        self.cursor.unread()
    }
}

/// Length-prefixed stack fragment.
///
/// How a suspended subtree's frames embed inside another frame (the
/// fan-out composites persist one sub-stack per still-suspended branch) and
/// how the top-level continuation is framed for the host. Encoding a
/// partially consumed restore writes only its unread remainder.
pub struct StackCodec;

impl Codec for StackCodec {
    type Value = Restore;

    fn encode(&self, value: &Restore, out: &mut String) -> Result<()> {
        Text.encode(&value.unread(), out)
    }

    fn decode(&self, cursor: &mut DecodeCursor) -> Result<Restore> {
        Ok(Restore::over(&Text.decode(cursor)?))
    }
}
