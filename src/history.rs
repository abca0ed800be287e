use serde::{Deserialize, Serialize};

use crate::event::CameraEvent;
use crate::generator::GeneratorContext;
use crate::message::Message;

/// Everything `undo` must restore, captured together immediately before a
/// turn is applied. Restoring a subset would desynchronize the event log
/// from the generator's conversational context, so the four slices only
/// ever travel as one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub events: Vec<CameraEvent>,
    pub messages: Vec<Message>,
    pub unread: usize,
    pub context: GeneratorContext,
}

/// Stack of pre-turn snapshots. One push per turn, one pop per undo; a
/// popped snapshot is gone (no redo). Unbounded: a long session trades
/// memory for arbitrarily deep undo.
#[derive(Debug, Default)]
pub struct TurnHistory {
    stack: Vec<TurnSnapshot>,
}

impl TurnHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: TurnSnapshot) {
        self.stack.push(snapshot);
    }

    /// `None` when there is nothing to undo. Callers should gate the
    /// operator-facing action on [`can_undo`](Self::can_undo) so an empty
    /// pop is never mistaken for a successful revert.
    pub fn pop(&mut self) -> Option<TurnSnapshot> {
        self.stack.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
