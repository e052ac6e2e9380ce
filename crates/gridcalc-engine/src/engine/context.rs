use std::collections::HashSet;

use super::cell_ref::CellRef;
use super::error::ErrorCode;

/// Most references that may be open on one resolution path at once. Each open
/// reference is a level of recursion, so this bounds stack use.
pub const MAX_RESOLUTION_DEPTH: usize = 512;

/// References on the active resolution path of one top-level evaluation.
///
/// Created fresh for every formula the orchestrator evaluates and threaded
/// through the evaluator and resolver by `&mut`. A reference is pushed before
/// its cell is resolved and popped once that resolution returns, so only
/// re-entrant chains are seen as cycles.
#[derive(Debug, Default)]
pub struct EvalContext {
    path: HashSet<CellRef>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `cell_ref` to the path. Fails with [`ErrorCode::CircularReference`]
    /// if it is already there, or [`ErrorCode::DepthExceeded`] if the path is
    /// [`MAX_RESOLUTION_DEPTH`] long.
    pub fn enter(&mut self, cell_ref: CellRef) -> Result<(), ErrorCode> {
        if self.path.contains(&cell_ref) {
            return Err(ErrorCode::CircularReference);
        }
        if self.path.len() >= MAX_RESOLUTION_DEPTH {
            return Err(ErrorCode::DepthExceeded);
        }
        self.path.insert(cell_ref);
        Ok(())
    }

    pub fn leave(&mut self, cell_ref: &CellRef) {
        self.path.remove(cell_ref);
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        self.path.contains(cell_ref)
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
