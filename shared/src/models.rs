use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One OHLCV bar. `timestamp` is epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Candles ordered oldest to newest, one per timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries(Vec<Candle>);

impl CandleSeries {
    /// Sorts by timestamp and keeps the first candle seen for each timestamp.
    pub fn from_candles(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        candles.dedup_by_key(|c| c.timestamp);
        CandleSeries(candles)
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.0.last()
    }

    pub fn into_inner(self) -> Vec<Candle> {
        self.0
    }
}

impl Deref for CandleSeries {
    type Target = [Candle];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Granularity unit understood by the OHLCV upstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeframeUnit {
    Minute,
    Hour,
}

impl TimeframeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeframeUnit::Minute => "minute",
            TimeframeUnit::Hour => "hour",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    Minute1,
    Minute5,
    Minute15,
    Hour1,
}

impl TimeFrame {
    pub fn unit(&self) -> TimeframeUnit {
        match self {
            TimeFrame::Minute1 | TimeFrame::Minute5 | TimeFrame::Minute15 => TimeframeUnit::Minute,
            TimeFrame::Hour1 => TimeframeUnit::Hour,
        }
    }

    /// Number of base units folded into one candle.
    pub fn aggregate(&self) -> u32 {
        match self {
            TimeFrame::Minute1 | TimeFrame::Hour1 => 1,
            TimeFrame::Minute5 => 5,
            TimeFrame::Minute15 => 15,
        }
    }

    /// How many candles an analysis request pulls for this timeframe.
    pub fn candle_limit(&self) -> usize {
        match self {
            TimeFrame::Minute15 => 50,
            TimeFrame::Minute1 | TimeFrame::Minute5 | TimeFrame::Hour1 => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Hour1 => "1h",
        }
    }
}

/// Body of an analysis request, as sent by the browser frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    #[serde(rename = "pairAddress", default)]
    pub pair_address: String,
}

/// The 13 momentum/crossover flags returned for one pool.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalResult {
    pub macd_above_signal_1m: bool,
    pub macd_above_signal_5m: bool,
    pub bullish_engulfing_5m: bool,
    pub macd_cross_1m: bool,
    pub macd_cross_5m: bool,
    pub macd_cross_15m: bool,
    pub rsi_1m_condition: bool,
    pub ema_20_above_ema_50_1m: bool,
    pub ema_20_crossed_ema_50_1m_in_last_10: bool,
    pub ema_20_above_ema_50_5m: bool,
    pub ema_20_crossed_ema_50_5m_in_last_3: bool,
    pub price_crossed_ema_20_50_1m: bool,
    pub price_crossed_ema_20_50_5m: bool,
}

impl SignalResult {
    /// Human-readable description paired with each flag, in response order.
    pub fn described(&self) -> [(&'static str, bool); 13] {
        [
            ("MACD above signal 1m", self.macd_above_signal_1m),
            ("MACD above signal 5m", self.macd_above_signal_5m),
            ("Bullish Engulfing 5m", self.bullish_engulfing_5m),
            ("MACD Cross 1m", self.macd_cross_1m),
            ("MACD Cross 5m", self.macd_cross_5m),
            ("MACD Cross 15m", self.macd_cross_15m),
            ("RSI 1m > 37 and rising", self.rsi_1m_condition),
            ("EMA 20 above EMA 50 1m", self.ema_20_above_ema_50_1m),
            (
                "EMA 20 crossed above EMA 50 in last 10 1m candles",
                self.ema_20_crossed_ema_50_1m_in_last_10,
            ),
            ("EMA 20 above EMA 50 5m", self.ema_20_above_ema_50_5m),
            (
                "EMA 20 crossed above EMA 50 in last 3 5m candles",
                self.ema_20_crossed_ema_50_5m_in_last_3,
            ),
            (
                "Price crossed above EMA 20 or EMA 50 in last 5 1m candles",
                self.price_crossed_ema_20_50_1m,
            ),
            (
                "Price crossed above EMA 20 or EMA 50 in last 2 5m candles",
                self.price_crossed_ema_20_50_5m,
            ),
        ]
    }
}
