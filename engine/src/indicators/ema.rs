// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::Candle;

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let closes: Vec<Option<f64>> = data.iter().map(|c| Some(c.close)).collect();
        ema_values(&closes, self.period)
    }
}

/// EMA with smoothing factor `2 / (period + 1)`, seeded with the first defined
/// value rather than an initial simple average.
///
/// Undefined inputs before the seed stay undefined; later undefined inputs are
/// reported as undefined without disturbing the running average.
pub fn ema_values(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut previous: Option<f64> = None;

    values
        .iter()
        .map(|value| {
            let value = (*value)?;
            let next = match previous {
                // prev + a*(x - prev) keeps a constant input exactly constant
                Some(prev) => prev + alpha * (value - prev),
                None => value,
            };
            previous = Some(next);
            Some(next)
        })
        .collect()
}
