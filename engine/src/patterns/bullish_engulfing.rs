use shared::models::Candle;

/// Whether the last two candles of `window` form a bullish engulfing pair:
/// a down candle followed by an up candle closing above the down candle's open.
///
/// Fewer than two candles never match.
pub fn is_bullish_engulfing(window: &[Candle]) -> bool {
    let [.., prev, curr] = window else {
        return false;
    };
    curr.is_bullish() && prev.is_bearish() && curr.close > prev.open
}

/// Whether any of the trailing `pairs` adjacent pairs of `candles` is bullish engulfing.
///
/// Pairs reaching before the first candle are skipped.
pub fn any_bullish_engulfing(candles: &[Candle], pairs: usize) -> bool {
    let len = candles.len();
    (len.saturating_sub(pairs)..len)
        .filter(|&i| i >= 1)
        .any(|i| is_bullish_engulfing(&candles[i - 1..=i]))
}
