//! Window statistics and exponential smoothing over `f64` slices

/// Arithmetic mean of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Population standard deviation (divides by N) of the last `period` values
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let mean = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

/// Smoothing factor for an EMA of the given span: `2 / (span + 1)`
pub fn ema_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

pub fn ema_from_previous(value: f64, previous: f64, span: usize) -> f64 {
    let alpha = ema_alpha(span);
    value * alpha + previous * (1.0 - alpha)
}

/// EMA over the whole series, seeded on the first value.
///
/// The output has the same length as the input.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return out;
    };
    out.push(first);
    let mut previous = first;
    for &value in iter {
        previous = ema_from_previous(value, previous, span);
        out.push(previous);
    }
    out
}

/// Pointwise `a - b`, truncated to the shorter input
pub fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}
