//! The killer-move table: up to two non-capture moves per ply that caused a
//! beta cutoff there, tried early against siblings at the same ply. Scoped
//! to a single top-level search invocation and cleared at entry, never
//! process-wide.

use crate::chess::{Move, Square};

/// Deepest ply any strength profile searches to, including its quiescence
/// budget: Pro's depth 6 plus a 6-ply quiescence extension, with headroom.
pub(crate) const MAX_SEARCH_PLY: usize = 16;

/// A move identified only by its (from, to) squares, the comparison key used
/// for killer-move matching.
type KillerKey = (Square, Square);

#[derive(Clone)]
pub(crate) struct KillerMoves {
    slots: [[Option<KillerKey>; 2]; MAX_SEARCH_PLY],
}

impl KillerMoves {
    pub(crate) fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_SEARCH_PLY],
        }
    }

    /// Whether `mv` is a stored killer at `ply`.
    #[must_use]
    pub(crate) fn is_killer(&self, ply: usize, mv: Move) -> bool {
        let key = (mv.from, mv.to);
        self.slots
            .get(ply)
            .is_some_and(|slot| slot[0] == Some(key) || slot[1] == Some(key))
    }

    /// Records a beta cutoff at `ply`: the new move becomes slot 0 and the
    /// prior slot 0 shifts to slot 1. Only called for non-capture moves.
    pub(crate) fn record(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        let key = (mv.from, mv.to);
        if slot[0] == Some(key) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(key);
    }
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self::new()
    }
}
