use corelib::{Candle, CandleBatch};
use serde::Deserialize;

use super::errors::FinnhubError;

/// Raw `stock/candle` payload, e.g.
/// `{"c":[1.0],"h":[1.1],"l":[0.9],"o":[1.0],"s":"ok","t":[1603065600],"v":[1547144]}`.
///
/// Arrays are index-aligned and ascending in time. `no_data` responses
/// carry only `s`.
#[derive(Debug, Deserialize)]
pub struct CandleEnvelope {
    #[serde(rename = "s")]
    pub status: Option<String>,

    #[serde(rename = "c", default)]
    pub close: Vec<f64>,
    #[serde(rename = "h", default)]
    pub high: Vec<f64>,
    #[serde(rename = "l", default)]
    pub low: Vec<f64>,
    #[serde(rename = "o", default)]
    pub open: Vec<f64>,
    #[serde(rename = "t", default)]
    pub timestamp: Vec<i64>,
    #[serde(rename = "v", default)]
    pub volume: Vec<f64>,

    /// Present instead of data when the request itself is rejected.
    pub error: Option<String>,
}

impl CandleEnvelope {
    pub fn into_batch(self) -> Result<CandleBatch, FinnhubError> {
        if let Some(err) = self.error {
            return Err(FinnhubError::Api(err));
        }

        match self.status.as_deref() {
            Some("ok") => {}
            Some("no_data") => return Ok(CandleBatch::no_data()),
            other => {
                return Err(FinnhubError::InvalidResponse(format!(
                    "unexpected status {:?}",
                    other
                )));
            }
        }

        let n = self.close.len();
        let aligned = [
            self.high.len(),
            self.low.len(),
            self.open.len(),
            self.timestamp.len(),
            self.volume.len(),
        ]
        .iter()
        .all(|len| *len == n);

        if !aligned {
            return Err(FinnhubError::InvalidResponse(
                "candle arrays are not index-aligned".into(),
            ));
        }

        let candles = (0..n)
            .map(|i| Candle {
                timestamp: self.timestamp[i],
                open: self.open[i],
                high: self.high[i],
                low: self.low[i],
                close: self.close[i],
                volume: self.volume[i].max(0.0).round() as u64,
            })
            .collect();

        Ok(CandleBatch::ok(candles))
    }
}

#[cfg(test)]
mod tests {
    use corelib::CandleStatus;

    use super::*;

    fn parse(raw: &str) -> Result<CandleBatch, FinnhubError> {
        serde_json::from_str::<CandleEnvelope>(raw)
            .expect("valid json")
            .into_batch()
    }

    #[test]
    fn ok_payload_becomes_candles() {
        let batch = parse(
            r#"{"c":[10.5,11.0],"h":[11,12],"l":[10,10.5],"o":[10.2,10.9],
                "s":"ok","t":[1603065600,1603152000],"v":[1547144,2000000.4]}"#,
        )
        .unwrap();

        assert_eq!(batch.status, CandleStatus::Ok);
        assert_eq!(batch.candles.len(), 2);
        assert_eq!(batch.candles[1].close, 11.0);
        assert_eq!(batch.candles[1].volume, 2_000_000);
        assert_eq!(batch.candles[0].timestamp, 1_603_065_600);
    }

    #[test]
    fn no_data_is_not_an_error() {
        let batch = parse(r#"{"s":"no_data"}"#).unwrap();

        assert_eq!(batch.status, CandleStatus::NoData);
        assert!(!batch.is_ok());
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let err = parse(r#"{"c":[1,2],"h":[1],"l":[1,2],"o":[1,2],"s":"ok","t":[1,2],"v":[1,2]}"#)
            .unwrap_err();
        assert!(matches!(err, FinnhubError::InvalidResponse(_)));
    }

    #[test]
    fn api_error_field_wins() {
        let err = parse(r#"{"error":"You don't have access to this resource."}"#).unwrap_err();
        assert!(matches!(err, FinnhubError::Api(msg) if msg.contains("access")));
    }
}
