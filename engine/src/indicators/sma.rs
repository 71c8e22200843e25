// Simple Moving Average (SMA) over a trailing window

/// Trailing mean of `window` values ending at each index.
///
/// An index is undefined until a full window of defined values is available,
/// and whenever any value inside its window is undefined.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let mut sum = 0.0;
            for value in &values[i + 1 - window..=i] {
                sum += (*value)?;
            }
            Some(sum / window as f64)
        })
        .collect()
}
