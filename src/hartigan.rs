//! Choosing k using Hartigan's rule.
//!
//! For each k, the rule compares the total within-cluster sum of squares SS(k) with SS(k+1):
//!
//! ```text
//! H(k) = (SS(k) / SS(k+1) - 1) * (n - k - 1)
//! ```
//!
//! A large H(k) means that adding the (k+1)-th cluster still reduces the dispersion considerably.
//! The recommended k is the smallest one with `H(k) <= threshold` (10 by default).

use crate::{Error, KMeans, KMeansConfig, Result};
use log::{debug, info};

/// One line of a [`HartiganReport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HartiganRow {
    pub k: usize,
    /// Total within-cluster sum of squares of the best k-means result for this k
    pub distsum: f64,
    /// Hartigan index H(k). Not available for the largest k, which has no successor.
    pub index: Option<f64>,
}

/// Result of [`Hartigan::select_k`].
#[derive(Clone, Debug, PartialEq)]
pub struct HartiganReport {
    /// One row per k, for k = 1..=max_k
    pub rows: Vec<HartiganRow>,
    /// Smallest k with `H(k) <= threshold`, or max_k if there is none
    pub recommended_k: usize,
    /// `true` if no k satisfied the rule. **recommended_k** is only a lower bound in that case.
    pub inconclusive: bool,
    /// Threshold the rule was applied with
    pub threshold: f64,
}
impl HartiganReport {
    pub fn row(&self, k: usize) -> Option<&HartiganRow> {
        k.checked_sub(1).and_then(|idx| self.rows.get(idx))
    }
}

/// k-selection using Hartigan's rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hartigan {
    threshold: f64,
}
impl Default for Hartigan {
    fn default() -> Self { Self { threshold: 10.0 } }
}
impl Hartigan {
    /// Set the stopping threshold.
    /// ## Default
    /// `10.0`
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold; self
    }

    /// Run k-means for every k = 1..=**max_k** and apply Hartigan's rule to the resulting sums of squares.
    ///
    /// Every k is fitted with the same **restarts**, **seed** and **config** (see [`KMeans::fit`]). The fits
    /// run one after another; each of them is parallelized over its restarts.
    ///
    /// ## Arguments
    /// - **kmean**: Dataset to operate on
    /// - **max_k**: Largest k to try (`2 <= max_k <= sample_cnt`)
    /// - **restarts**: Amount of restarts per k (`>= 1`)
    /// - **seed**: Seed for the random number generators
    /// - **config**: [`KMeansConfig`] used for every fit
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_hartigan::*;
    ///
    /// let samples = vec![0.0f64, 0.1, 0.2, 10.0, 10.1, 10.2, 20.0, 20.1, 20.2];
    /// let kmean = KMeans::new(&samples, 9, 1).unwrap();
    /// let report = Hartigan::default().select_k(&kmean, 5, 10, 42, &KMeansConfig::default()).unwrap();
    ///
    /// for row in &report.rows {
    ///     println!("k={} SS={:.3} H={:?}", row.k, row.distsum, row.index);
    /// }
    /// println!("Recommended k: {}", report.recommended_k);
    /// ```
    pub fn select_k(&self, kmean: &KMeans, max_k: usize, restarts: usize, seed: u64, config: &KMeansConfig<'_>) -> Result<HartiganReport> {
        if max_k < 2 {
            return Err(Error::InvalidParameter { name: "max_k", message: "has to be at least 2" });
        }
        if max_k > kmean.sample_cnt {
            return Err(Error::InvalidClusterCount { requested: max_k, sample_cnt: kmean.sample_cnt });
        }
        if restarts == 0 {
            return Err(Error::InvalidParameter { name: "restarts", message: "at least one restart is required" });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::InvalidParameter { name: "threshold", message: "has to be finite and non-negative" });
        }

        let mut distsums = Vec::with_capacity(max_k);
        for k in 1..=max_k {
            let res = kmean.fit(k, restarts, seed, config)?;
            debug!("hartigan: k={} distsum={:.6}", k, res.distsum);
            distsums.push(res.distsum);
        }

        let rows: Vec<HartiganRow> = distsums.iter().enumerate()
            .map(|(idx, &distsum)| HartiganRow {
                k: idx + 1,
                distsum,
                index: distsums.get(idx + 1).map(|&next| hartigan_index(distsum, next, kmean.sample_cnt, idx + 1)),
            })
            .collect();

        let recommended = rows.iter()
            .find(|r| r.index.map(|h| h <= self.threshold).unwrap_or(false))
            .map(|r| r.k);
        let report = HartiganReport {
            recommended_k: recommended.unwrap_or(max_k),
            inconclusive: recommended.is_none(),
            threshold: self.threshold,
            rows,
        };
        info!("hartigan: recommended k={}{}", report.recommended_k, if report.inconclusive { " (inconclusive)" } else { "" });
        Ok(report)
    }
}

/// H(k) for the sums of squares of k and k+1 clusters on **sample_cnt** samples.
/// A perfect fit with k clusters gains nothing from another one (H = 0), while a perfect fit
/// reached only with k+1 clusters is an infinite gain.
pub(crate) fn hartigan_index(distsum: f64, next_distsum: f64, sample_cnt: usize, k: usize) -> f64 {
    let scale = sample_cnt.saturating_sub(k + 1) as f64;
    if next_distsum > 0.0 {
        (distsum / next_distsum - 1.0) * scale
    } else if distsum > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{helpers::testing::blobs_2d, ErrorKind};

    #[test]
    fn index_formula() {
        assert_approx_eq!(hartigan_index(200.0, 100.0, 50, 2), 47.0);
        assert_approx_eq!(hartigan_index(110.0, 100.0, 12, 1), 1.0);
        assert_eq!(hartigan_index(5.0, 0.0, 10, 3), f64::INFINITY);
        assert_eq!(hartigan_index(0.0, 0.0, 10, 3), 0.0);
        assert_eq!(hartigan_index(3.0, 1.0, 4, 3), 0.0);
    }

    #[test]
    fn four_blobs() {
        // (N - k - 1) grows with N, so the blobs are kept small for the rule to settle at threshold 10
        let centers = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)];
        for (per_blob, data_seed) in [(10, 77), (10, 5), (8, 21)] {
            let samples = blobs_2d(&centers, per_blob, 1.0, data_seed);
            let kmean = KMeans::new(&samples, 4 * per_blob, 2).unwrap();
            let report = kmean.select_k(6, 100, 42, &KMeansConfig::default()).unwrap();

            assert!(!report.inconclusive, "{:?}", report);
            assert!((3..=5).contains(&report.recommended_k), "{:?}", report);
            assert_eq!(report.threshold, 10.0);
            assert_eq!(report.rows.len(), 6);
            assert!(report.rows.iter().enumerate().all(|(idx, r)| r.k == idx + 1));
            assert!(report.rows[..5].iter().all(|r| r.index.is_some()));
            assert_eq!(report.rows[5].index, None);
            // well separated blobs: splitting them up is always worth it
            assert!(report.row(1).unwrap().index.unwrap() > 10.0);
            assert!(report.row(2).unwrap().index.unwrap() > 10.0);
            assert_eq!(report.row(0), None);
            assert_eq!(report.row(7), None);
        }
    }

    #[test]
    fn rows_match_single_fits() {
        let samples = blobs_2d(&[(0.0, 0.0), (5.0, 5.0)], 15, 2.0, 3);
        let kmean = KMeans::new(&samples, 30, 2).unwrap();
        let report = kmean.select_k(4, 3, 9, &KMeansConfig::default()).unwrap();
        for k in 1..=4 {
            let res = kmean.fit(k, 3, 9, &KMeansConfig::default()).unwrap();
            assert_eq!(report.row(k).unwrap().distsum, res.distsum);
        }
    }

    #[test]
    fn evenly_spread_samples_are_inconclusive() {
        // every additional cluster keeps paying off on a uniform line
        let samples: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let kmean = KMeans::new(&samples, 100, 1).unwrap();
        let report = kmean.select_k(6, 10, 1, &KMeansConfig::default()).unwrap();
        assert!(report.inconclusive);
        assert_eq!(report.recommended_k, 6);

        // ... unless the threshold is raised far enough
        let lenient = Hartigan::default().threshold(1e6).select_k(&kmean, 6, 10, 1, &KMeansConfig::default()).unwrap();
        assert!(!lenient.inconclusive);
        assert_eq!(lenient.recommended_k, 1);
    }

    #[test]
    fn invalid_arguments() {
        let kmean = KMeans::new(&[1.0f64, 2.0, 3.0, 4.0], 4, 1).unwrap();
        let conf = KMeansConfig::default();
        assert!(matches!(kmean.select_k(1, 1, 0, &conf), Err(Error::InvalidParameter { name: "max_k", .. })));
        assert_eq!(kmean.select_k(5, 1, 0, &conf).unwrap_err(), Error::InvalidClusterCount { requested: 5, sample_cnt: 4 });
        assert!(matches!(kmean.select_k(3, 0, 0, &conf), Err(Error::InvalidParameter { name: "restarts", .. })));
        let err = Hartigan::default().threshold(f64::NAN).select_k(&kmean, 3, 1, 0, &conf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(kmean.select_k(4, 1, 0, &conf).is_ok());
    }
}
