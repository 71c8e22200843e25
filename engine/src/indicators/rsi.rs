// Relative Strength Index (RSI) indicator implementation
use super::sma::rolling_mean;
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::Candle;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Rsi::new(14)
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    /// Average gain and loss are simple means over the trailing `period` price
    /// changes, so the first value appears at index `period`.
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let deltas: Vec<Option<f64>> = data
            .iter()
            .enumerate()
            .map(|(i, candle)| (i > 0).then(|| candle.close - data[i - 1].close))
            .collect();

        let gains: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
        let losses: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

        rolling_mean(&gains, self.period)
            .into_iter()
            .zip(rolling_mean(&losses, self.period))
            .map(|(gain, loss)| relative_strength_index(gain?, loss?))
            .collect()
    }
}

fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        // flat window: 0/0 has no meaningful strength
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}
