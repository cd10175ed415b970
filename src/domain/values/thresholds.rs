use serde::Serialize;

/// Oversold/overbought bands for the relative-strength indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RsiThresholds {
    lower: f64,
    upper: f64,
}

impl RsiThresholds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, String> {
        if !(lower > 0.0 && upper < 100.0) {
            return Err(format!(
                "RSI thresholds must lie strictly inside 0-100, got {lower}/{upper}"
            ));
        }
        if lower >= upper {
            return Err(format!(
                "Lower RSI threshold ({lower}) must be below upper ({upper})"
            ));
        }
        Ok(RsiThresholds { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

impl Default for RsiThresholds {
    fn default() -> Self {
        RsiThresholds {
            lower: 30.0,
            upper: 70.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = RsiThresholds::default();
        assert_eq!((t.lower(), t.upper()), (30.0, 70.0));
    }

    #[test]
    fn test_serializes_bands() {
        let json = serde_json::to_value(RsiThresholds::new(25.0, 75.0).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"lower": 25.0, "upper": 75.0}));
    }

    #[test]
    fn test_rejects_inverted_or_out_of_range() {
        assert!(RsiThresholds::new(70.0, 30.0).is_err());
        assert!(RsiThresholds::new(50.0, 50.0).is_err());
        assert!(RsiThresholds::new(0.0, 70.0).is_err());
        assert!(RsiThresholds::new(30.0, 100.0).is_err());
        assert!(RsiThresholds::new(20.0, 80.0).is_ok());
    }
}
