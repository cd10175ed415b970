// Rolling mean, rolling deviation and Bollinger bands.

/// Simple moving average over `window` values.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Population standard deviation over `window` values.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        let n = w.len() as f64;
        let mean = w.iter().sum::<f64>() / n;
        let var = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        var.sqrt()
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

/// Bollinger bands: SMA ± `k` standard deviations.
pub fn bollinger(values: &[f64], window: usize, k: f64) -> Vec<Option<Band>> {
    sma(values, window)
        .into_iter()
        .zip(rolling_std(values, window))
        .map(|(mid, sd)| match (mid, sd) {
            (Some(middle), Some(sd)) => Some(Band {
                lower: middle - k * sd,
                middle,
                upper: middle + k * sd,
            }),
            _ => None,
        })
        .collect()
}

fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 || values.len() < window {
        return vec![None; values.len()];
    }
    let mut out = vec![None; window - 1];
    out.extend(values.windows(window).map(|w| Some(f(w))));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sma_basic() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!(approx(out[2].unwrap(), 2.0));
        assert!(approx(out[3].unwrap(), 3.0));
        assert!(approx(out[4].unwrap(), 4.0));
    }

    #[test]
    fn test_sma_short_series_is_all_none() {
        assert_eq!(sma(&[1.0, 2.0], 20), vec![None, None]);
        assert_eq!(sma(&[1.0, 2.0], 0), vec![None, None]);
        assert!(sma(&[], 5).is_empty());
    }

    #[test]
    fn test_sma_window_equal_to_len() {
        let out = sma(&[2.0, 4.0, 6.0], 3);
        assert_eq!(out[..2], [None, None]);
        assert!(approx(out[2].unwrap(), 4.0));
    }

    #[test]
    fn test_rolling_std_population() {
        // Classic example: mean 5, population sd 2.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_std(&values, 8);
        assert!(approx(out[7].unwrap(), 2.0));
    }

    #[test]
    fn test_rolling_std_constant_is_zero() {
        let out = rolling_std(&[3.0; 5], 3);
        assert!(out[2..].iter().all(|v| approx(v.unwrap(), 0.0)));
    }

    #[test]
    fn test_bollinger_bands() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = bollinger(&values, 8, 2.0);
        assert!(bands[..7].iter().all(Option::is_none));
        let b = bands[7].unwrap();
        assert!(approx(b.middle, 5.0));
        assert!(approx(b.upper, 9.0));
        assert!(approx(b.lower, 1.0));
    }
}
