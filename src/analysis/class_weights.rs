use std::collections::BTreeMap;

use crate::instance::Instance;
use crate::labels::LabelTable;

/// Complement-of-frequency weights over the training instances.
///
/// For each *declared* label index `idx`:
/// `weight = 1 - count(output == idx) / total`. More frequent classes get
/// lower weight; a class that never appears gets exactly 1.0 and a class
/// covering the whole training set gets exactly 0.0. Weights are not
/// normalized and need not sum to 1.
///
/// Declared indices are compared against positional outputs; they coincide
/// only for a sorted, 0-contiguous label file.
///
/// The caller guarantees `training` is non-empty.
pub fn compute_class_weights(training: &[Instance], labels: &LabelTable) -> BTreeMap<usize, f64> {
    let total = training.len() as f64;
    let mut weights = BTreeMap::new();
    for idx in labels.declared_indices() {
        let count = training.iter().filter(|ins| ins.output == Some(idx)).count();
        weights.insert(idx, 1.0 - count as f64 / total);
    }
    weights
}
