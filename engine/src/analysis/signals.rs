// Boolean momentum/crossover flags evaluated over the trailing candles of the
// 1m, 5m and 15m indicator frames.
use super::frame::{from_end, IndicatorFrame};
use crate::indicators::{gt, lt};
use crate::patterns::any_bullish_engulfing;
use shared::models::SignalResult;

pub const RSI_THRESHOLD: f64 = 37.0;

pub const MACD_CROSS_WINDOW_1M: usize = 10;
pub const MACD_CROSS_WINDOW_5M: usize = 5;
pub const MACD_CROSS_WINDOW_15M: usize = 2;

pub const EMA_CROSS_WINDOW_1M: usize = 10;
pub const EMA_CROSS_WINDOW_5M: usize = 3;

pub const PRICE_CROSS_WINDOW_1M: usize = 5;
pub const PRICE_CROSS_WINDOW_5M: usize = 2;

pub const ENGULFING_PAIRS_5M: usize = 4;

/// Evaluates all 13 flags. Each flag is independent of the others.
pub fn evaluate_signals(
    m1: &IndicatorFrame,
    m5: &IndicatorFrame,
    m15: &IndicatorFrame,
) -> SignalResult {
    SignalResult {
        macd_above_signal_1m: macd_above_signal_below_zero(m1),
        macd_above_signal_5m: macd_above_signal_below_zero(m5),
        bullish_engulfing_5m: any_bullish_engulfing(m5.candles, ENGULFING_PAIRS_5M),
        macd_cross_1m: macd_crossed_below_zero(m1, MACD_CROSS_WINDOW_1M),
        macd_cross_5m: macd_crossed_below_zero(m5, MACD_CROSS_WINDOW_5M),
        macd_cross_15m: macd_crossed_below_zero(m15, MACD_CROSS_WINDOW_15M),
        rsi_1m_condition: rsi_rising_above(m1, RSI_THRESHOLD),
        ema_20_above_ema_50_1m: gt(from_end(&m1.ema_20, 0), from_end(&m1.ema_50, 0)),
        ema_20_crossed_ema_50_1m_in_last_10: crossed_above(
            &m1.ema_20,
            &m1.ema_50,
            EMA_CROSS_WINDOW_1M,
        ),
        ema_20_above_ema_50_5m: gt(from_end(&m5.ema_20, 0), from_end(&m5.ema_50, 0)),
        ema_20_crossed_ema_50_5m_in_last_3: crossed_above(
            &m5.ema_20,
            &m5.ema_50,
            EMA_CROSS_WINDOW_5M,
        ),
        price_crossed_ema_20_50_1m: price_crossed_emas(m1, PRICE_CROSS_WINDOW_1M),
        price_crossed_ema_20_50_5m: price_crossed_emas(m5, PRICE_CROSS_WINDOW_5M),
    }
}

/// Whether `series` moved from strictly below to strictly above `reference`
/// between two consecutive samples ending inside the trailing `window`.
pub fn crossed_above(series: &[Option<f64>], reference: &[Option<f64>], window: usize) -> bool {
    crossed_above_where(series, reference, window, |_| true)
}

/// As [`crossed_above`], additionally requiring `at(i)` for the crossing index `i`.
pub fn crossed_above_where<F>(
    series: &[Option<f64>],
    reference: &[Option<f64>],
    window: usize,
    at: F,
) -> bool
where
    F: Fn(usize) -> bool,
{
    let len = series.len().min(reference.len());
    (len.saturating_sub(window)..len)
        .filter(|&i| i >= 1)
        .any(|i| lt(series[i - 1], reference[i - 1]) && gt(series[i], reference[i]) && at(i))
}

fn macd_above_signal_below_zero(frame: &IndicatorFrame) -> bool {
    let macd = from_end(&frame.macd_line, 0);
    gt(macd, from_end(&frame.signal_line, 0)) && lt(macd, Some(0.0))
}

fn macd_crossed_below_zero(frame: &IndicatorFrame, window: usize) -> bool {
    crossed_above_where(&frame.macd_line, &frame.signal_line, window, |i| {
        lt(frame.macd_line[i], Some(0.0))
    })
}

fn rsi_rising_above(frame: &IndicatorFrame, threshold: f64) -> bool {
    let latest = from_end(&frame.rsi, 0);
    gt(latest, Some(threshold)) && gt(latest, from_end(&frame.rsi, 1))
}

fn price_crossed_emas(frame: &IndicatorFrame, window: usize) -> bool {
    crossed_above(&frame.close, &frame.ema_20, window)
        || crossed_above(&frame.close, &frame.ema_50, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Candle;

    fn flat_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                timestamp: i as i64 * 60,
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 1.0,
            })
            .collect()
    }

    fn rising_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 10.0 + i as f64;
                Candle {
                    timestamp: i as i64 * 60,
                    open: close - 0.5,
                    high: close,
                    low: close - 0.5,
                    close,
                    volume: 1.0,
                }
            })
            .collect()
    }

    fn column(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().map(|v| Some(*v)).collect()
    }

    /// A series that sits at `below` and jumps to `above` at `cross_at`, against a zero reference.
    fn step(len: usize, cross_at: usize, below: f64, above: f64) -> Vec<Option<f64>> {
        (0..len).map(|i| Some(if i < cross_at { below } else { above })).collect()
    }

    #[test]
    fn test_crossed_above_window_boundaries() {
        let reference = vec![Some(0.0); 20];
        // crossing completes at index 10 = len - 10
        let series = step(20, 10, -1.0, 1.0);
        assert!(crossed_above(&series, &reference, 10));
        assert!(!crossed_above(&series, &reference, 9));
        // crossing at len - 11 falls outside a 10 window
        let series = step(20, 9, -1.0, 1.0);
        assert!(!crossed_above(&series, &reference, 10));
        assert!(crossed_above(&series, &reference, 11));
    }

    #[test]
    fn test_equal_values_never_cross() {
        let line = column(&[-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(!crossed_above(&line, &line, 5));
        // touching the reference then moving above is not a cross either
        let series = column(&[-1.0, 0.0, 1.0]);
        let reference = column(&[0.0, 0.0, 0.0]);
        assert!(!crossed_above(&series, &reference, 3));
    }

    #[test]
    fn test_downward_cross_is_ignored() {
        let reference = vec![Some(0.0); 6];
        assert!(!crossed_above(&step(6, 3, 1.0, -1.0), &reference, 6));
    }

    #[test]
    fn test_cross_with_undefined_values() {
        let series = vec![None, Some(1.0), Some(2.0)];
        let reference = column(&[0.0, 1.5, 1.5]);
        assert!(crossed_above(&series, &reference, 3));
        let series = vec![Some(1.0), None, Some(2.0)];
        assert!(!crossed_above(&series, &reference, 3));
    }

    #[test]
    fn test_window_longer_than_series() {
        let reference = vec![Some(0.0); 3];
        assert!(crossed_above(&step(3, 1, -1.0, 1.0), &reference, 10));
        assert!(!crossed_above(&[], &[], 10));
        assert!(!crossed_above(&[Some(1.0)], &[Some(0.0)], 10));
    }

    #[test]
    fn test_crossed_above_where_checks_crossing_index() {
        let reference = vec![Some(0.0); 5];
        let series = step(5, 3, -1.0, 1.0);
        assert!(crossed_above_where(&series, &reference, 5, |i| i == 3));
        assert!(!crossed_above_where(&series, &reference, 5, |i| i == 2));
    }

    #[test]
    fn test_rising_market_flags() {
        let m1 = rising_candles(100);
        let m5 = rising_candles(100);
        let m15 = rising_candles(50);
        let result = evaluate_signals(
            &IndicatorFrame::compute(&m1),
            &IndicatorFrame::compute(&m5),
            &IndicatorFrame::compute(&m15),
        );
        assert_eq!(
            result,
            SignalResult {
                ema_20_above_ema_50_1m: true,
                ema_20_above_ema_50_5m: true,
                ..SignalResult::default()
            }
        );
    }

    #[test]
    fn test_flat_market_raises_nothing() {
        let candles = flat_candles(100);
        let frame = IndicatorFrame::compute(&candles);
        assert_eq!(evaluate_signals(&frame, &frame, &frame), SignalResult::default());
    }

    #[test]
    fn test_macd_above_signal_requires_negative_macd() {
        let candles = flat_candles(12);
        let mut frame = IndicatorFrame::compute(&candles);
        let flat = IndicatorFrame::compute(&candles);

        *frame.macd_line.last_mut().unwrap() = Some(-0.1);
        *frame.signal_line.last_mut().unwrap() = Some(-0.2);
        let result = evaluate_signals(&frame, &frame, &flat);
        assert!(result.macd_above_signal_1m);
        assert!(result.macd_above_signal_5m);

        *frame.macd_line.last_mut().unwrap() = Some(0.1);
        *frame.signal_line.last_mut().unwrap() = Some(0.05);
        assert!(!evaluate_signals(&frame, &frame, &flat).macd_above_signal_1m);
    }

    #[test]
    fn test_macd_cross_windows_per_timeframe() {
        let candles = flat_candles(20);
        let flat = IndicatorFrame::compute(&candles);

        // MACD crosses above its signal line below zero, completing at index 15 (5 from the end)
        let mut crossing = IndicatorFrame::compute(&candles);
        crossing.macd_line = step(20, 15, -0.3, -0.1);
        crossing.signal_line = vec![Some(-0.2); 20];

        let result = evaluate_signals(&crossing, &crossing, &crossing);
        assert!(result.macd_cross_1m);
        assert!(result.macd_cross_5m);
        assert!(!result.macd_cross_15m);

        let result = evaluate_signals(&flat, &flat, &crossing);
        assert!(!result.macd_cross_1m);
        assert!(!result.macd_cross_5m);

        // same cross, but the MACD line is positive at the crossing point
        crossing.macd_line = step(20, 19, -0.3, 0.1);
        let result = evaluate_signals(&crossing, &crossing, &crossing);
        assert!(!result.macd_cross_1m);
        assert!(!result.macd_cross_15m);

        crossing.macd_line = step(20, 19, -0.3, -0.1);
        assert!(evaluate_signals(&flat, &flat, &crossing).macd_cross_15m);
    }

    #[test]
    fn test_rsi_condition() {
        let candles = flat_candles(20);
        let flat = IndicatorFrame::compute(&candles);
        let mut frame = IndicatorFrame::compute(&candles);

        let mut set_tail = |prev: Option<f64>, latest: Option<f64>| {
            frame.rsi[18] = prev;
            frame.rsi[19] = latest;
            evaluate_signals(&frame, &flat, &flat).rsi_1m_condition
        };

        assert!(set_tail(Some(38.0), Some(40.0)));
        assert!(!set_tail(Some(41.0), Some(40.0)));
        assert!(!set_tail(Some(40.0), Some(40.0)));
        assert!(!set_tail(Some(30.0), Some(36.5)));
        assert!(!set_tail(Some(30.0), Some(37.0)));
        assert!(!set_tail(None, Some(60.0)));
        assert!(!set_tail(Some(50.0), None));
    }

    #[test]
    fn test_ema_cross_windows() {
        let candles = flat_candles(30);
        let flat = IndicatorFrame::compute(&candles);
        let mut frame = IndicatorFrame::compute(&candles);
        frame.ema_50 = vec![Some(1.0); 30];
        // completes at index 27 = 3 from the end
        frame.ema_20 = step(30, 27, 0.9, 1.1);

        let result = evaluate_signals(&frame, &frame, &flat);
        assert!(result.ema_20_crossed_ema_50_1m_in_last_10);
        assert!(result.ema_20_crossed_ema_50_5m_in_last_3);
        assert!(result.ema_20_above_ema_50_1m);
        assert!(result.ema_20_above_ema_50_5m);

        // 4 from the end: still inside 10, outside 3
        frame.ema_20 = step(30, 26, 0.9, 1.1);
        let result = evaluate_signals(&frame, &frame, &flat);
        assert!(result.ema_20_crossed_ema_50_1m_in_last_10);
        assert!(!result.ema_20_crossed_ema_50_5m_in_last_3);

        // 11 from the end: outside both
        frame.ema_20 = step(30, 19, 0.9, 1.1);
        let result = evaluate_signals(&frame, &frame, &flat);
        assert!(!result.ema_20_crossed_ema_50_1m_in_last_10);
        assert!(result.ema_20_above_ema_50_1m);
    }

    #[test]
    fn test_price_cross_either_ema() {
        let candles = flat_candles(10);
        let flat = IndicatorFrame::compute(&candles);
        let mut frame = IndicatorFrame::compute(&candles);
        frame.ema_20 = vec![Some(5.0); 10];
        frame.ema_50 = vec![Some(1.0); 10];
        // close crosses EMA 50 only, completing at the latest candle
        frame.close = step(10, 9, 0.5, 2.0);

        let result = evaluate_signals(&frame, &frame, &flat);
        assert!(result.price_crossed_ema_20_50_1m);
        assert!(result.price_crossed_ema_20_50_5m);

        // 3 from the end: inside the 1m window of 5, outside the 5m window of 2
        frame.close = step(10, 7, 0.5, 2.0);
        let result = evaluate_signals(&frame, &frame, &flat);
        assert!(result.price_crossed_ema_20_50_1m);
        assert!(!result.price_crossed_ema_20_50_5m);

        // crossing EMA 20 only
        frame.ema_50 = vec![Some(0.1); 10];
        frame.close = step(10, 9, 4.0, 6.0);
        assert!(evaluate_signals(&frame, &frame, &flat).price_crossed_ema_20_50_5m);
    }

    #[test]
    fn test_bullish_engulfing_5m_from_candles() {
        let mut candles = flat_candles(10);
        candles[7] = Candle {
            open: 10.0,
            close: 8.0,
            high: 10.0,
            low: 8.0,
            ..candles[7]
        };
        candles[8] = Candle {
            open: 9.0,
            close: 11.0,
            high: 11.0,
            low: 9.0,
            ..candles[8]
        };
        let flat = flat_candles(10);
        let m5 = IndicatorFrame::compute(&candles);
        let other = IndicatorFrame::compute(&flat);
        assert!(evaluate_signals(&other, &m5, &other).bullish_engulfing_5m);
        assert!(!evaluate_signals(&m5, &other, &m5).bullish_engulfing_5m);
    }

    #[test]
    fn test_short_15m_frame_is_harmless() {
        let candles = flat_candles(12);
        let frame = IndicatorFrame::compute(&candles);
        let empty = IndicatorFrame::compute(&[]);
        let result = evaluate_signals(&frame, &frame, &empty);
        assert!(!result.macd_cross_15m);
    }
}
