use super::Direction;

/// Result of measuring one poll's close against the session range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveReading {
    /// Percent distance from the session high (when below it) or from
    /// the session low (otherwise). Gates move alerts.
    pub range_move_pct: f64,

    /// Percent change against the previous close, relative to today's
    /// close. Display only.
    pub intraday_change_pct: f64,
}

impl MoveReading {
    pub fn direction(&self) -> Direction {
        if self.range_move_pct < 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Strictly beyond `tier_pct` in the reading's own direction.
    pub fn crosses(&self, tier_pct: f64) -> bool {
        match self.direction() {
            Direction::Down => self.range_move_pct < -tier_pct,
            Direction::Up => self.range_move_pct > tier_pct,
        }
    }
}

/// Measures intraday moves and lists the tiers a reading crosses.
#[derive(Clone, Debug)]
pub struct MoveDetector {
    tiers_pct: [f64; 3],
}

impl MoveDetector {
    pub fn new(tiers_pct: [f64; 3]) -> Self {
        Self { tiers_pct }
    }

    pub fn tiers(&self) -> &[f64; 3] {
        &self.tiers_pct
    }

    pub fn measure(
        &self,
        close: f64,
        session_high: f64,
        session_low: f64,
        previous_close: Option<f64>,
    ) -> MoveReading {
        MoveReading {
            range_move_pct: range_move_pct(close, session_high, session_low),
            intraday_change_pct: previous_close
                .map(|prev| intraday_change_pct(close, prev))
                .unwrap_or(0.0),
        }
    }

    /// Indexes of tiers the reading crosses, ascending.
    pub fn crossed_tiers<'a>(&'a self, reading: &'a MoveReading) -> impl Iterator<Item = usize> + 'a {
        self.tiers_pct
            .iter()
            .enumerate()
            .filter(move |(_, tier)| reading.crosses(**tier))
            .map(|(i, _)| i)
    }
}

/// Branch order matters: only a close strictly below the high is measured
/// against the high; everything else (including a flat session) is
/// measured against the low. A non-positive reference reads as no move.
pub fn range_move_pct(close: f64, session_high: f64, session_low: f64) -> f64 {
    let reference = if close < session_high {
        session_high
    } else {
        session_low
    };
    if reference <= 0.0 {
        return 0.0;
    }
    (close - reference) / reference * 100.0
}

pub fn intraday_change_pct(close: f64, previous_close: f64) -> f64 {
    if close == 0.0 {
        return 0.0;
    }
    (close - previous_close) / close * 100.0
}
