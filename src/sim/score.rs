//! Match score and win condition

use serde::{Deserialize, Serialize};

use super::paddle::Side;

/// Points for both players plus the first-to-N rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreManager {
    left: u32,
    right: u32,
    winning_score: u32,
    winner: Option<Side>,
    last_scorer: Option<Side>,
}

impl ScoreManager {
    pub fn new(winning_score: u32) -> Self {
        Self {
            left: 0,
            right: 0,
            winning_score: winning_score.max(1),
            winner: None,
            last_scorer: None,
        }
    }

    /// Award a point. Returns true when the match is over.
    ///
    /// Scores are frozen once a winner exists; further calls change nothing.
    pub fn add_point(&mut self, side: Side) -> bool {
        if self.winner.is_some() {
            return true;
        }

        self.last_scorer = Some(side);
        let score = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *score += 1;

        if *score >= self.winning_score {
            self.winner = Some(side);
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.left = 0;
        self.right = 0;
        self.winner = None;
        self.last_scorer = None;
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn last_scorer(&self) -> Option<Side> {
        self.last_scorer
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// "left - right", e.g. "11 - 0"
    pub fn score_string(&self) -> String {
        format!("{} - {}", self.left, self.right)
    }
}
