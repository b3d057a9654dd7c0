use corelib::{AlertIcon, Notification};
use market::pulse::{CrossPolarity, Direction};

pub const NOTIFICATION_TITLE: &str = "Findicate";

/// Everything the latches can raise in one session.
///
/// The vocabulary is closed (at most nine distinct messages with the
/// default tiers), which is what bounds the dedup cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alert {
    IntradayMove { direction: Direction, tier_pct: f64 },
    VolumeSpike,
    MovingAverageCross(CrossPolarity),
}

impl Alert {
    pub fn message(&self) -> String {
        match self {
            Alert::IntradayMove {
                direction,
                tier_pct,
            } => format!("{}{}% INTRADAY MOVE", direction.sign(), tier_pct),
            Alert::VolumeSpike => "HIGHER THAN AVERAGE DAILY VOLUME".to_string(),
            Alert::MovingAverageCross(CrossPolarity::Golden) => "ALERT: GOLDEN CROSS".to_string(),
            Alert::MovingAverageCross(CrossPolarity::Death) => "ALERT: DEATH CROSS".to_string(),
        }
    }

    pub fn icon(&self) -> AlertIcon {
        match self {
            Alert::IntradayMove {
                direction: Direction::Up,
                ..
            }
            | Alert::MovingAverageCross(CrossPolarity::Golden) => AlertIcon::Up,
            Alert::IntradayMove {
                direction: Direction::Down,
                ..
            }
            | Alert::MovingAverageCross(CrossPolarity::Death) => AlertIcon::Down,
            Alert::VolumeSpike => AlertIcon::Neutral,
        }
    }

    pub fn to_notification(&self, display_seconds: u32) -> Notification {
        Notification {
            title: NOTIFICATION_TITLE.to_string(),
            message: self.message(),
            icon: self.icon(),
            display_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_alert_vocabulary() {
        let down10 = Alert::IntradayMove {
            direction: Direction::Down,
            tier_pct: 10.0,
        };
        let up20 = Alert::IntradayMove {
            direction: Direction::Up,
            tier_pct: 20.0,
        };

        assert_eq!(down10.message(), "-10% INTRADAY MOVE");
        assert_eq!(up20.message(), "+20% INTRADAY MOVE");
        assert_eq!(
            Alert::VolumeSpike.message(),
            "HIGHER THAN AVERAGE DAILY VOLUME"
        );
        assert_eq!(
            Alert::MovingAverageCross(CrossPolarity::Golden).message(),
            "ALERT: GOLDEN CROSS"
        );
        assert_eq!(
            Alert::MovingAverageCross(CrossPolarity::Death).message(),
            "ALERT: DEATH CROSS"
        );
    }

    #[test]
    fn icons_follow_direction() {
        let up = Alert::IntradayMove {
            direction: Direction::Up,
            tier_pct: 15.0,
        };

        assert_eq!(up.icon(), AlertIcon::Up);
        assert_eq!(Alert::VolumeSpike.icon(), AlertIcon::Neutral);
        assert_eq!(
            Alert::MovingAverageCross(CrossPolarity::Death).icon(),
            AlertIcon::Down
        );

        let n = up.to_notification(20);
        assert_eq!(n.title, "Findicate");
        assert_eq!(n.message, "+15% INTRADAY MOVE");
        assert_eq!(n.display_seconds, 20);
    }
}
