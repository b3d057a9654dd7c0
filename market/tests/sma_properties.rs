use market::{MovingAverage, SmaError, compute_sma};
use proptest::prelude::*;

fn naive_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn sma_is_mean_of_trailing_window(
        closes in prop::collection::vec(0.01f64..10_000.0, 1..300),
        period in 1usize..250,
    ) {
        let result = compute_sma(&closes, period);

        if closes.len() >= period {
            let expected = naive_mean(&closes[closes.len() - period..]);
            prop_assert!(close_enough(result.unwrap(), expected));
        } else {
            prop_assert_eq!(
                result,
                Err(SmaError::InsufficientData { period, available: closes.len() })
            );
        }
    }

    #[test]
    fn running_average_agrees_with_slice_as_series_grows(
        history in prop::collection::vec(0.01f64..10_000.0, 0..120),
        days in prop::collection::vec(prop::collection::vec(0.01f64..10_000.0, 1..4), 1..40),
        period in 1usize..60,
    ) {
        let mut ma = MovingAverage::seeded(period, &history).unwrap();
        let mut closed = history.clone();

        for polls in days {
            // several polls overwrite the same in-progress day
            for close in &polls {
                let mut with_today = closed.clone();
                with_today.push(*close);

                match (ma.with_in_progress(*close), compute_sma(&with_today, period)) {
                    (Ok(live), Ok(expected)) => prop_assert!(close_enough(live, expected)),
                    (Err(a), Err(b)) => prop_assert_eq!(a, b),
                    (a, b) => prop_assert!(false, "running {:?} vs slice {:?}", a, b),
                }
            }

            let final_close = *polls.last().unwrap();
            ma.push_closed(final_close);
            closed.push(final_close);

            match (ma.closed_value(), compute_sma(&closed, period)) {
                (Ok(a), Ok(b)) => prop_assert!(close_enough(a, b)),
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                (a, b) => prop_assert!(false, "running {:?} vs slice {:?}", a, b),
            }
        }
    }
}
