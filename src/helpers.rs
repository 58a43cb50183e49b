use std::collections::HashMap;

/// Squared euclidean distance between two samples / centroids of equal dimensionality.
#[inline(always)]
pub(crate) fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter())
        .map(|(av, bv)| av - bv)        // <sample> - <centroid>
        .map(|v| v * v)                 // <vec_components> ^2
        .sum()                          // sum(<vec_components>^2)
}

/// Check whether two label vectors describe the same partition of the samples, ignoring label identity.
/// Builds the label bijection while walking both vectors, and fails as soon as it would be violated.
pub(crate) fn same_partition(a: &[usize], b: &[usize]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut idmap = HashMap::new();
    let mut idrevmap = HashMap::new();
    a.iter().cloned().zip(b.iter().cloned()).all(|(a_id, b_id)| {
        match (idmap.get(&a_id), idrevmap.get(&b_id)) {
            (None, None) => {
                idmap.insert(a_id, b_id);
                idrevmap.insert(b_id, a_id);
                true
            },
            (Some(&mapped_b), Some(&mapped_a)) => mapped_b == b_id && mapped_a == a_id,
            _ => false
        }
    })
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-12))
}
