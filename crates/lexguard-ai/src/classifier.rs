//! Clause classification seam between the analysis path and a trained model.

use lexguard_core::Category;

/// One model decision for a paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub category: Category,
    /// Probability of `category` under the model's softmax.
    pub score: f32,
}

/// A model that assigns each paragraph a risk category.
pub trait ClauseClassifier {
    /// Classify a batch of texts, returning one prediction per input, in order.
    fn classify_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>>;
}

/// Numerically stable softmax over raw logits.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and value of the largest probability; the first index wins ties.
pub fn argmax(probs: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probs.iter().enumerate() {
        match best {
            Some((_, b)) if p <= b => {}
            _ => best = Some((i, p)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[2.0, 1.0, 0.1]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs[0] > probs[1] && probs[1] > probs[2]);
    }

    #[test]
    fn softmax_handles_large_logits() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-5);
        assert!(probs.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn argmax_first_wins_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some((1, 0.4)));
        assert_eq!(argmax(&[]), None);
    }
}
