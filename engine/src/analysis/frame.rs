use crate::indicators::{Ema, IndicatorCalculator, Macd, Rsi};
use shared::models::Candle;

pub const EMA_FAST_PERIOD: usize = 20;
pub const EMA_SLOW_PERIOD: usize = 50;
pub const RSI_PERIOD: usize = 14;

/// Indicator values derived from one candle series, index-aligned with it.
#[derive(Debug, Clone)]
pub struct IndicatorFrame<'a> {
    pub candles: &'a [Candle],
    pub close: Vec<Option<f64>>,
    pub ema_20: Vec<Option<f64>>,
    pub ema_50: Vec<Option<f64>>,
    pub macd_line: Vec<Option<f64>>,
    pub signal_line: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl<'a> IndicatorFrame<'a> {
    pub fn compute(candles: &'a [Candle]) -> Self {
        let ema_fast = Ema::new(EMA_FAST_PERIOD);
        let ema_slow = Ema::new(EMA_SLOW_PERIOD);
        let rsi = Rsi::new(RSI_PERIOD);
        let macd = Macd::default();

        let calculators: [&dyn IndicatorCalculator; 4] = [&ema_fast, &ema_slow, &rsi, &macd];
        for calculator in calculators {
            tracing::trace!(
                indicator = calculator.name(),
                parameters = %calculator.parameters(),
                candles = candles.len(),
                "Computing indicator"
            );
        }

        let macd_series = macd.compute(candles);

        IndicatorFrame {
            candles,
            close: candles.iter().map(|c| Some(c.close)).collect(),
            ema_20: ema_fast.calculate(candles),
            ema_50: ema_slow.calculate(candles),
            macd_line: macd_series.macd_line,
            signal_line: macd_series.signal_line,
            macd_histogram: macd_series.histogram,
            rsi: rsi.calculate(candles),
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Value `back` positions before the latest one (0 = latest); undefined past either end.
pub fn from_end(values: &[Option<f64>], back: usize) -> Option<f64> {
    let len = values.len();
    if back >= len {
        return None;
    }
    values[len - 1 - back]
}
