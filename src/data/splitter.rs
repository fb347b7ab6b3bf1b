// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Randomly shuffles items and splits them into two sets:
//   - Training set: used to update model weights
//   - Test set:     used to measure loss on unseen pairs
//                   at the end of every epoch
//
// Why shuffle before splitting?
//   Conversation corpora are ordered by movie and by scene.
//   Without shuffling, the test set would hold entire movies the
//   model never saw any dialogue style from, which measures the
//   wrong thing.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// the standard unbiased shuffle algorithm.
//
// Reference: rand crate documentation

use rand::seq::SliceRandom;

/// Randomly shuffle `items` and split into (train, test).
///
/// # Arguments
/// * `items`          - All available items (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.9 = 90%
pub fn split_train_test<T>(mut items: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let mut rng = rand::thread_rng();
    items.shuffle(&mut rng);

    // Clamp to valid range to avoid panics on tiny datasets
    let total = items.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let test = items.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test",
        items.len(),
        test.len(),
    );

    (items, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test) = split_train_test(items, 0.9);
        assert_eq!(train.len(), 90);
        assert_eq!(test.len(), 10);
    }

    #[test]
    fn test_all_items_preserved() {
        // No items should be lost in the split
        let items: Vec<usize> = (0..50).collect();
        let (train, test) = split_train_test(items, 0.7);
        assert_eq!(train.len() + test.len(), 50);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test) = split_train_test(items, 0.9);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_full_training_split() {
        // 1.0 fraction means everything goes to training
        let items: Vec<usize> = (0..10).collect();
        let (train, test) = split_train_test(items, 1.0);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }
}
