//! One-shot alert latches.
//!
//! Each latch moves `Unset -> Set` at most once and has no way back:
//! there is deliberately no reset. Dropping the owning session is the
//! only way to get fresh latches.

use market::pulse::{
    CrossPolarity, Direction, MoveDetector, MoveReading, averages_converged, is_volume_spike,
};

use crate::alert::Alert;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LatchState {
    #[default]
    Unset,
    Set,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Latch {
    state: LatchState,
}

impl Latch {
    pub fn state(&self) -> LatchState {
        self.state
    }

    pub fn is_set(&self) -> bool {
        self.state == LatchState::Set
    }

    /// Sets the latch. Returns true only for the call that performed
    /// the transition.
    pub fn trip(&mut self) -> bool {
        match self.state {
            LatchState::Unset => {
                self.state = LatchState::Set;
                true
            }
            LatchState::Set => false,
        }
    }
}

/// Inputs for the MA-crossover guard. Any missing average disables it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossoverInput {
    pub short_sma: Option<f64>,
    pub long_sma: Option<f64>,
    pub short_baseline: Option<f64>,
    pub long_baseline: Option<f64>,
    pub decimals: u32,
}

/// Session-scoped set of latches: three per move direction, one for
/// volume, one for the moving-average cross.
#[derive(Debug, Clone, Default)]
pub struct AnomalyLatches {
    up: [Latch; 3],
    down: [Latch; 3],
    volume: Latch,
    crossover: Latch,
}

impl AnomalyLatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_volume(&mut self, volume: u64, ceiling: u64) -> Option<Alert> {
        if self.volume.is_set() || !is_volume_spike(volume, ceiling) {
            return None;
        }
        self.volume.trip();
        Some(Alert::VolumeSpike)
    }

    /// First-match chain over the ascending tiers of the reading's
    /// direction: the lowest crossed tier whose latch is still unset fires,
    /// and nothing else does on this poll.
    pub fn check_move(&mut self, detector: &MoveDetector, reading: &MoveReading) -> Option<Alert> {
        let direction = reading.direction();
        let tiers = *detector.tiers();

        let latches = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };

        for idx in detector.crossed_tiers(reading) {
            if latches[idx].trip() {
                return Some(Alert::IntradayMove {
                    direction,
                    tier_pct: tiers[idx],
                });
            }
        }

        None
    }

    pub fn check_crossover(&mut self, input: &CrossoverInput) -> Option<Alert> {
        if self.crossover.is_set() {
            return None;
        }

        let (Some(short), Some(long), Some(short_base), Some(long_base)) = (
            input.short_sma,
            input.long_sma,
            input.short_baseline,
            input.long_baseline,
        ) else {
            return None;
        };

        if !averages_converged(short, long, input.decimals) {
            return None;
        }

        self.crossover.trip();
        Some(Alert::MovingAverageCross(CrossPolarity::from_baseline(
            long_base, short_base,
        )))
    }

    pub fn move_latch(&self, direction: Direction, tier_idx: usize) -> Option<&Latch> {
        match direction {
            Direction::Up => self.up.get(tier_idx),
            Direction::Down => self.down.get(tier_idx),
        }
    }

    pub fn volume(&self) -> &Latch {
        &self.volume
    }

    pub fn crossover(&self) -> &Latch {
        &self.crossover
    }

    /// Every latch in a fixed order (up tiers, down tiers, volume, cross).
    pub fn states(&self) -> [LatchState; 8] {
        [
            self.up[0].state(),
            self.up[1].state(),
            self.up[2].state(),
            self.down[0].state(),
            self.down[1].state(),
            self.down[2].state(),
            self.volume.state(),
            self.crossover.state(),
        ]
    }
}
