use crate::game::Rules;

/// Upper bound for any single evaluator weight.
pub const MAX_WEIGHT: i32 = 5_000;

/// Trait for evaluating a position from the mover's perspective, given both
/// players' occupancy masks.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, rules: &Rules, own: u64, opp: u64) -> i32;
}

/// Weights for [`LineWindowHeuristic`]. Rewards are added for the mover's
/// windows, penalties subtracted for the opponent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Window filled entirely by one side.
    pub completed: i32,
    /// Window one piece short of complete, rest empty.
    pub near_win: i32,
    /// Window two pieces short of complete, rest empty.
    pub open_pair: i32,
    pub opponent_completed: i32,
    pub opponent_near_win: i32,
    pub opponent_open_pair: i32,
    /// Per piece in the central column(s).
    pub center: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            completed: 1_000,
            near_win: 50,
            open_pair: 10,
            opponent_completed: 1_000,
            opponent_near_win: 80,
            opponent_open_pair: 10,
            center: 3,
        }
    }
}

impl EvalWeights {
    /// Check the ordering that keeps the evaluator monotone: adding one of
    /// the mover's pieces never lowers the score, adding an opponent piece
    /// never raises it.
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            ("completed", self.completed),
            ("near_win", self.near_win),
            ("open_pair", self.open_pair),
            ("opponent_completed", self.opponent_completed),
            ("opponent_near_win", self.opponent_near_win),
            ("opponent_open_pair", self.opponent_open_pair),
            ("center", self.center),
        ];
        for (name, w) in all {
            if !(0..=MAX_WEIGHT).contains(&w) {
                return Err(format!("eval.{name} must be in [0, {MAX_WEIGHT}]"));
            }
        }
        if self.near_win < self.open_pair || self.completed < self.near_win {
            return Err("eval weights must satisfy completed >= near_win >= open_pair".into());
        }
        if self.opponent_near_win < self.opponent_open_pair
            || self.opponent_completed < self.opponent_near_win
        {
            return Err(
                "eval weights must satisfy opponent_completed >= opponent_near_win >= opponent_open_pair"
                    .into(),
            );
        }
        Ok(())
    }
}

/// Scores every run-length window on the board by how close each side is to
/// filling it, plus a bonus for central pieces.
#[derive(Debug, Clone, Default)]
pub struct LineWindowHeuristic {
    weights: EvalWeights,
}

impl LineWindowHeuristic {
    pub fn new(weights: EvalWeights) -> Self {
        LineWindowHeuristic { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    fn score_window(&self, own: u32, opp: u32, run: u32) -> i32 {
        let w = &self.weights;
        match (own, opp) {
            (0, 0) => 0,
            (n, 0) if n == run => w.completed,
            (n, 0) if n + 1 == run => w.near_win,
            (n, 0) if n + 2 == run => w.open_pair,
            (0, n) if n == run => -w.opponent_completed,
            (0, n) if n + 1 == run => -w.opponent_near_win,
            (0, n) if n + 2 == run => -w.opponent_open_pair,
            _ => 0,
        }
    }
}

impl Heuristic for LineWindowHeuristic {
    fn evaluate(&self, rules: &Rules, own: u64, opp: u64) -> i32 {
        let run = rules.run_length() as u32;
        let center = rules.geometry().center_mask();

        let mut score = self.weights.center * (own & center).count_ones() as i32
            - self.weights.center * (opp & center).count_ones() as i32;

        for &window in rules.detector().windows() {
            let own_n = (own & window).count_ones();
            let opp_n = (opp & window).count_ones();
            score += self.score_window(own_n, opp_n, run);
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bitboard::encode;
    use crate::game::{GameKind, Geometry, Placement};

    fn eval(rules: &Rules, state: &str) -> i32 {
        LineWindowHeuristic::default().evaluate(rules, encode(state, '1'), encode(state, '2'))
    }

    fn c4(cells: &[(usize, usize, char)]) -> String {
        let mut s = vec!['0'; 42];
        for &(col, row, c) in cells {
            s[row * 7 + col] = c;
        }
        s.into_iter().collect()
    }

    #[test]
    fn heuristic_empty_board_is_zero() {
        let rules = Rules::connect_four();
        assert_eq!(eval(&rules, &"0".repeat(42)), 0);
    }

    #[test]
    fn heuristic_is_antisymmetric() {
        let rules = Rules::connect_four();
        let state = c4(&[(3, 5, '1'), (4, 5, '2'), (3, 4, '1')]);
        let h = LineWindowHeuristic::default();
        let own = encode(&state, '1');
        let opp = encode(&state, '2');
        let w = EvalWeights {
            opponent_near_win: 50,
            ..EvalWeights::default()
        };
        let symmetric = LineWindowHeuristic::new(w);
        assert_eq!(
            symmetric.evaluate(&rules, own, opp),
            -symmetric.evaluate(&rules, opp, own)
        );
        assert_ne!(h.evaluate(&rules, own, opp), 0);
    }

    #[test]
    fn heuristic_center_preference() {
        let rules = Rules::connect_four();
        let center = eval(&rules, &c4(&[(3, 5, '1')]));
        let edge = eval(&rules, &c4(&[(0, 5, '1')]));
        assert!(
            center > edge,
            "Center ({center}) should score higher than edge ({edge})"
        );
    }

    #[test]
    fn heuristic_three_in_a_row_scores_high() {
        let rules = Rules::connect_four();
        let score = eval(&rules, &c4(&[(0, 5, '1'), (1, 5, '1'), (2, 5, '1')]));
        assert!(score > 40, "3-in-a-row should score high, got {score}");
    }

    #[test]
    fn heuristic_opponent_threat_scores_low() {
        let rules = Rules::connect_four();
        let score = eval(&rules, &c4(&[(0, 5, '2'), (1, 5, '2'), (2, 5, '2')]));
        assert!(score < -40, "opponent 3-in-a-row should score low, got {score}");
    }

    #[test]
    fn heuristic_adding_own_piece_never_lowers_score() {
        let rules = Rules::connect_four();
        let base = c4(&[(2, 5, '2'), (3, 5, '2'), (3, 4, '1')]);
        let before = eval(&rules, &base);
        for i in (0..42).filter(|&i| base.as_bytes()[i] == b'0') {
            let mut next = base.clone().into_bytes();
            next[i] = b'1';
            let after = eval(&rules, std::str::from_utf8(&next).unwrap());
            assert!(after >= before, "placing at {i}: {after} < {before}");
        }
    }

    #[test]
    fn heuristic_works_on_other_geometries() {
        let rules = Rules::new(
            GameKind::TicTacToe,
            Geometry::new(4, 4).unwrap(),
            3,
            Placement::Free,
        )
        .unwrap();
        let state = "1100000000000000";
        assert!(eval(&rules, state) > 0);
    }

    #[test]
    fn default_weights_are_valid() {
        EvalWeights::default().validate().unwrap();
    }

    #[test]
    fn validation_rejects_inverted_weights() {
        let w = EvalWeights {
            open_pair: 100,
            near_win: 50,
            ..EvalWeights::default()
        };
        assert!(w.validate().is_err());
        let w = EvalWeights {
            center: -1,
            ..EvalWeights::default()
        };
        assert!(w.validate().is_err());
        let w = EvalWeights {
            opponent_completed: MAX_WEIGHT + 1,
            ..EvalWeights::default()
        };
        assert!(w.validate().is_err());
    }
}
