//! Per-color registry of the pieces still in play.

use chess_model::Color;

use crate::board::PieceId;

/// Live pieces of each color, in the order they entered play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceRegistry {
    live: [Vec<PieceId>; 2],
}

impl PieceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live pieces of the given color.
    #[inline]
    pub fn pieces(&self, color: Color) -> &[PieceId] {
        &self.live[color.index()]
    }

    /// Returns the number of live pieces of the given color.
    #[inline]
    pub fn len(&self, color: Color) -> usize {
        self.live[color.index()].len()
    }

    /// Returns true if the piece is registered under the given color.
    pub fn contains(&self, color: Color, id: PieceId) -> bool {
        self.live[color.index()].contains(&id)
    }

    pub(crate) fn insert(&mut self, color: Color, id: PieceId) {
        let live = &mut self.live[color.index()];
        if !live.contains(&id) {
            live.push(id);
        }
    }

    /// Removes a piece, returning false if it was not registered.
    pub(crate) fn remove(&mut self, color: Color, id: PieceId) -> bool {
        let live = &mut self.live[color.index()];
        match live.iter().position(|&other| other == id) {
            Some(index) => {
                live.remove(index);
                true
            }
            None => false,
        }
    }
}
