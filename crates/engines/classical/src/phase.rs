//! Game phase from the number of empty squares.

use std::fmt;

use othello_core::Position;
use serde::Serialize;

use crate::config::{PhaseDepths, PhaseThresholds, PhaseWeights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
    /// Few enough empties to solve the game exactly
    Exhaustive,
}

impl GamePhase {
    pub fn from_empties(empties: u32, thresholds: &PhaseThresholds) -> Self {
        if empties <= thresholds.exhaustive_max_empties {
            GamePhase::Exhaustive
        } else if empties >= thresholds.opening_min_empties {
            GamePhase::Opening
        } else if empties >= thresholds.midgame_min_empties {
            GamePhase::Midgame
        } else {
            GamePhase::Endgame
        }
    }

    pub fn of(pos: &Position, thresholds: &PhaseThresholds) -> Self {
        Self::from_empties(pos.empty_count(), thresholds)
    }

    /// Depth to search in this phase, never beyond the end of the game.
    pub fn target_depth(self, empties: u32, depths: &PhaseDepths) -> u8 {
        let empties = empties.min(u32::from(u8::MAX)) as u8;
        let depth = match self {
            GamePhase::Opening => depths.opening,
            GamePhase::Midgame => depths.midgame,
            GamePhase::Endgame => depths.endgame,
            GamePhase::Exhaustive => empties,
        };
        depth.min(empties)
    }

    #[inline]
    pub fn weight(self, weights: &PhaseWeights) -> i32 {
        match self {
            GamePhase::Opening => weights.opening,
            GamePhase::Midgame => weights.midgame,
            GamePhase::Endgame | GamePhase::Exhaustive => weights.endgame,
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Opening => "opening",
            GamePhase::Midgame => "midgame",
            GamePhase::Endgame => "endgame",
            GamePhase::Exhaustive => "exhaustive",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let t = PhaseThresholds::default();
        assert_eq!(GamePhase::from_empties(60, &t), GamePhase::Opening);
        assert_eq!(GamePhase::from_empties(50, &t), GamePhase::Opening);
        assert_eq!(GamePhase::from_empties(49, &t), GamePhase::Midgame);
        assert_eq!(GamePhase::from_empties(20, &t), GamePhase::Midgame);
        assert_eq!(GamePhase::from_empties(19, &t), GamePhase::Endgame);
        assert_eq!(GamePhase::from_empties(11, &t), GamePhase::Endgame);
        assert_eq!(GamePhase::from_empties(10, &t), GamePhase::Exhaustive);
        assert_eq!(GamePhase::from_empties(0, &t), GamePhase::Exhaustive);
    }

    #[test]
    fn test_target_depths() {
        let d = PhaseDepths::default();
        assert_eq!(GamePhase::Opening.target_depth(60, &d), 3);
        assert_eq!(GamePhase::Midgame.target_depth(30, &d), 4);
        assert_eq!(GamePhase::Endgame.target_depth(15, &d), 6);
        assert_eq!(GamePhase::Exhaustive.target_depth(9, &d), 9);
        // Capped by what is left on the board
        assert_eq!(GamePhase::Endgame.target_depth(4, &d), 4);
    }

    #[test]
    fn test_exhaustive_uses_endgame_weight() {
        let w = PhaseWeights::new(1, 2, 3);
        assert_eq!(GamePhase::Opening.weight(&w), 1);
        assert_eq!(GamePhase::Midgame.weight(&w), 2);
        assert_eq!(GamePhase::Exhaustive.weight(&w), 3);
    }
}
