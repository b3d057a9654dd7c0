use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use corelib::CurrencyConverter;

/// Static rate table. Falls back to the inverse pair when only that is known.
#[derive(Debug, Clone, Default)]
pub struct FixedRateConverter {
    rates: HashMap<(String, String), f64>,
}

impl FixedRateConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: &str, to: &str, rate: f64) -> Self {
        self.rates
            .insert((from.to_uppercase(), to.to_uppercase()), rate);
        self
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if from == to {
            return Some(1.0);
        }
        if let Some(rate) = self.rates.get(&(from.clone(), to.clone())) {
            return Some(*rate);
        }
        self.rates
            .get(&(to, from))
            .filter(|r| **r != 0.0)
            .map(|r| 1.0 / r)
    }
}

#[async_trait]
impl CurrencyConverter for FixedRateConverter {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> anyhow::Result<f64> {
        let rate = self
            .rate(from, to)
            .ok_or_else(|| anyhow!("no rate for {from}->{to}"))?;
        Ok(amount * rate)
    }
}
