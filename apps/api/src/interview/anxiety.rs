use serde::{Deserialize, Serialize};

const FEAR_WEIGHT: f64 = 0.7;
const SAD_WEIGHT: f64 = 0.3;

/// Facial-expression probabilities for one webcam frame. Missing
/// expressions count as zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ExpressionFrame {
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub sad: f64,
}

impl ExpressionFrame {
    /// Weighted fear/sadness, in 0.0–1.0.
    pub fn anxiety(&self) -> f64 {
        (self.fear * FEAR_WEIGHT + self.sad * SAD_WEIGHT).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnxietySummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// All zero when there are no samples.
pub fn summarize(samples: &[f64]) -> AnxietySummary {
    if samples.is_empty() {
        return AnxietySummary::default();
    }
    let sum: f64 = samples.iter().sum();
    AnxietySummary {
        average: sum / samples.len() as f64,
        min: samples.iter().copied().fold(f64::INFINITY, f64::min),
        max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        count: samples.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anxiety_weights() {
        let frame = ExpressionFrame { fear: 0.5, sad: 1.0 };
        assert!((frame.anxiety() - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_missing_expressions_are_zero() {
        let frame: ExpressionFrame = serde_json::from_str(r#"{"happy": 0.9}"#).unwrap();
        assert_eq!(frame.anxiety(), 0.0);
    }

    #[test]
    fn test_summary_of_samples() {
        let s = summarize(&[0.2, 0.6, 0.4]);
        assert!((s.average - 0.4).abs() < 1e-9);
        assert_eq!((s.min, s.max, s.count), (0.2, 0.6, 3));
    }

    #[test]
    fn test_empty_summary_is_zero() {
        assert_eq!(summarize(&[]), AnxietySummary::default());
    }
}
