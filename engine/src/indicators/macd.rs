// Moving Average Convergence/Divergence (MACD)
use super::ema::ema_values;
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::Candle;

/// The three index-aligned MACD outputs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdSeries {
    pub macd_line: Vec<Option<f64>>,
    pub signal_line: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }

    pub fn compute(&self, data: &[Candle]) -> MacdSeries {
        let closes: Vec<Option<f64>> = data.iter().map(|c| Some(c.close)).collect();
        let fast = ema_values(&closes, self.fast);
        let slow = ema_values(&closes, self.slow);

        let macd_line: Vec<Option<f64>> = fast
            .iter()
            .zip(&slow)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();
        // signal line is the same recurrence run over the MACD line itself
        let signal_line = ema_values(&macd_line, self.signal);
        let histogram = macd_line
            .iter()
            .zip(&signal_line)
            .map(|(m, s)| Some((*m)? - (*s)?))
            .collect();

        MacdSeries {
            macd_line,
            signal_line,
            histogram,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Macd::new(12, 26, 9)
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    /// The histogram; use [`Macd::compute`] for all three lines.
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        self.compute(data).histogram
    }
}
