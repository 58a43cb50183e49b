use crate::{helpers, memory::*, AbortStrategy, Error, Hartigan, HartiganReport, Init, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use log::{info, warn};
use rayon::prelude::*;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a> = &'a (dyn Fn(usize, &[f64]) + Sync);
pub type IterationDoneCallbackFn<'a> = &'a (dyn Fn(&IterationStatus) + Sync);

/// Status information handed to the `iteration_done` callback after each finished iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationStatus {
    /// Index of the restart this iteration belongs to
    pub restart: usize,
    /// Number of the iteration within its restart (starting at 1)
    pub iteration: usize,
    /// Sum of (squared) distances from all samples to the centroids they were assigned to in this iteration
    pub distsum: f64,
    /// Amount of samples that changed their cluster in this iteration
    pub reassigned: usize,
}

/// This is a structure holding various configuration options for k-means calculations, such as
/// the iteration limit, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// Restarts of one calculation run in parallel, which is why all callbacks have to be [`Sync`].
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a> {
    /// Callback that is called, when the initialization phase of a restart finished
    /// ## Arguments
    /// - **restart**: Index of the restart
    /// - **centroids**: Initial centroids [row-major]
    pub(crate) init_done: InitDoneCallbackFn<'a>,
    /// Callback that is called after each iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a>,
    /// Maximum amount of iterations per restart
    pub(crate) max_iter: usize,
    /// Centroid initialization method
    pub(crate) init: Init,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy,
    /// Flag that is polled between iterations. Once set, the calculation is aborted with [`Error::Cancelled`].
    pub(crate) cancel_flag: Option<&'a AtomicBool>,
}
impl<'a> Default for KMeansConfig<'a> {
    fn default() -> Self {
        Self {
            init_done: &|_, _| {},
            iteration_done: &|_| {},
            max_iter: 100,
            init: Init::RandomSample,
            abort_strategy: AbortStrategy::NoReassignment,
            cancel_flag: None,
        }
    }
}
impl<'a> KMeansConfig<'a> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel_flag.map(|f| f.load(Ordering::Relaxed)).unwrap_or(false)
    }
}
impl<'a> std::fmt::Debug for KMeansConfig<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("max_iter", &self.max_iter)
            .field("init", &self.init)
            .field("abort_strategy", &self.abort_strategy)
            .field("cancellable", &self.cancel_flag.is_some())
            .finish()
    }
}

pub struct KMeansConfigBuilder<'a> {
    config: KMeansConfig<'a>
}
impl<'a> KMeansConfigBuilder<'a> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Limit the maximum amount of iterations per restart.
    /// ## Default
    /// `100`
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter; self
    }
    /// Set the centroid initialization method. For more information, see documentation of [`Init`].
    /// ## Default
    /// [`Init::RandomSample`]
    pub fn init(mut self, init: Init) -> Self {
        self.config.init = init; self
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::NoReassignment`]
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Set a flag, that can be used to cooperatively cancel a running calculation from another thread.
    /// The flag is checked between iterations, never within one.
    pub fn cancel_flag(mut self, cancel_flag: &'a AtomicBool) -> Self {
        self.config.cancel_flag = Some(cancel_flag); self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a> { self.config }
}


/// This is the internally used data-structure, storing the current state of one restart during calculation.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// restarts to run in parallel, without having to duplicate the input-data.
#[derive(Clone, Debug)]
pub(crate) struct KMeansState {
    pub k: usize,
    pub sample_dims: usize,
    pub distsum: f64,
    pub centroids: Vec<f64>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<f64>,
}
impl KMeansState {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            sample_dims,
            distsum: f64::INFINITY,
            centroids: vec![0.0; sample_dims * k],
            centroid_frequency: vec![0usize; k],
            assignments: vec![usize::MAX; sample_cnt],
            centroid_distances: vec![f64::INFINITY; sample_cnt],
        }
    }
}


/// Final result of a k-means calculation, as returned by [`KMeans::fit`].
///
/// Cluster labels are an arbitrary permutation: cluster `0` of one run is not comparable to cluster `0`
/// of another run. Compare results using [`ClusteringResult::is_same_partition`] instead of raw labels.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **sample_dims**: Dimensionality of samples and centroids
/// - **distsum**: Total within-cluster sum of squares (sum of squared distances from all samples to their centroids)
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective cluster
/// - **centroid_distances**: Vector containing each sample's (squared) distance to its centroid
/// - **iterations**: Amount of iterations the winning restart ran
/// - **converged**: `false` if the winning restart was stopped by the iteration limit. Assignments are then
/// those of the last assignment step, so centroids are not necessarily the means of their samples.
/// - **restart**: Index of the winning restart
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringResult {
    pub k: usize,
    pub sample_dims: usize,
    pub distsum: f64,
    pub centroids: Vec<f64>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub restart: usize,
}
impl ClusteringResult {
    pub(crate) fn from_state(state: KMeansState, iterations: usize, converged: bool, restart: usize) -> Self {
        Self {
            k: state.k,
            sample_dims: state.sample_dims,
            distsum: state.distsum,
            centroids: state.centroids,
            centroid_frequency: state.centroid_frequency,
            assignments: state.assignments,
            centroid_distances: state.centroid_distances,
            iterations,
            converged,
            restart,
        }
    }

    /// Center of the cluster with the given index.
    pub fn centroid(&self, idx: usize) -> &[f64] {
        &self.centroids[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    /// Indices of all samples assigned to the cluster with the given index.
    pub fn cluster_members(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignments.iter().enumerate()
            .filter(move |(_, &a)| a == idx)
            .map(|(s, _)| s)
    }

    /// Check whether the given assignments describe the same partition of the samples as this result,
    /// regardless of how the clusters are labeled.
    pub fn is_same_partition(&self, assignments: &[usize]) -> bool {
        helpers::same_partition(&self.assignments, assignments)
    }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples (the dataset) you want to operate on.
/// The samples are validated and widened to [`f64`], which is used for all calculations.
///
/// ## Supported operations
/// - k-Means clustering (Lloyd, best of n restarts) [`KMeans::fit`]
/// - Choosing k using Hartigan's rule [`KMeans::select_k`] / [`Hartigan::select_k`]
/// - Column standardization [`KMeans::standardized`]
#[derive(Clone, Debug)]
pub struct KMeans {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<f64>
}
impl KMeans {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    pub fn new<T: Primitive>(samples: &[T], sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        if sample_cnt == 0 {
            return Err(Error::InvalidParameter { name: "sample_cnt", message: "dataset must contain at least one sample" });
        }
        if sample_dims == 0 {
            return Err(Error::InvalidParameter { name: "sample_dims", message: "samples must have at least one dimension" });
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(Error::InvalidParameter { name: "samples", message: "length has to be sample_cnt * sample_dims" });
        }
        let samples = samples.iter().enumerate()
            .map(|(i, v)| widen(*v).ok_or(Error::NonFiniteValue { sample: i / sample_dims, dim: i % sample_dims }))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Self { sample_cnt, sample_dims, samples })
    }

    /// Create a new instance of the [`KMeans`] structure from a list of rows (one row per sample).
    /// All rows need to have the same length.
    pub fn from_rows<T: Primitive, R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let sample_dims = rows.first().map(|r| r.as_ref().len())
            .ok_or(Error::InvalidParameter { name: "rows", message: "dataset must contain at least one sample" })?;
        let mut samples = Vec::with_capacity(rows.len() * sample_dims);
        for (sample, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != sample_dims {
                return Err(Error::DimensionMismatch { sample, expected: sample_dims, found: row.len() });
            }
            samples.extend_from_slice(row);
        }
        Self::new(&samples, rows.len(), sample_dims)
    }

    /// Amount of samples in the dataset.
    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    /// Amount of dimensions of each sample.
    pub fn sample_dims(&self) -> usize { self.sample_dims }
    /// Samples [row-major], as used for calculation.
    pub fn samples(&self) -> &[f64] { &self.samples }
    /// Sample with the given index.
    pub fn sample(&self, idx: usize) -> &[f64] { self.samples.nth(idx, self.sample_dims) }

    /// Create a copy of this dataset, with each column centered to a mean of 0 and scaled to
    /// a (sample) standard deviation of 1. Constant columns end up all zeros.
    pub fn standardized(&self) -> KMeans {
        KMeans {
            sample_cnt: self.sample_cnt,
            sample_dims: self.sample_dims,
            samples: crate::scale::standardize(&self.samples, self.sample_cnt, self.sample_dims)
        }
    }


    pub(crate) fn update_centroid_distances(&self, state: &mut KMeansState) {
        let centroids = &state.centroids;
        self.samples.par_chunks_exact(self.sample_dims)
            .zip(state.assignments.par_iter().cloned())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                *centroid_dist = helpers::squared_distance(s, centroids.nth(assignment, self.sample_dims));
            });
    }

    /// Assign every sample to its nearest centroid (ties go to the lower centroid index).
    /// ## Returns
    /// Amount of samples that changed their cluster
    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState, limit_k: Option<usize>) -> usize {
        let centroids = &state.centroids;
        let k = limit_k.unwrap_or(state.k);

        self.samples.par_chunks_exact(self.sample_dims)
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .map(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = centroids.chunks_exact(self.sample_dims).take(k)
                    .map(|c| helpers::squared_distance(s, c))
                    .enumerate()
                    .min_by(|(_,d0), (_,d1)| d0.total_cmp(d1))
                    .unwrap_or((0, f64::INFINITY));
                let changed = *assignment != best_idx;
                *assignment = best_idx;
                *centroid_dist = best_dist;
                changed as usize
            })
            .sum()
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut[usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    fn validate_k(&self, k: usize) -> Result<()> {
        if k == 0 || k > self.sample_cnt {
            return Err(Error::InvalidClusterCount { requested: k, sample_cnt: self.sample_cnt });
        }
        Ok(())
    }


    /// K-Means clustering (Lloyd's algorithm), keeping the best of multiple randomly initialized restarts.
    ///
    /// Each restart initializes its centroids (see [`Init`]), then alternates between assigning every sample to
    /// its nearest centroid and moving every centroid to the mean of its samples, until the configured
    /// [`AbortStrategy`] stops it, or `max_iter` is reached. The restart with the lowest total
    /// within-cluster sum of squares wins.
    ///
    /// Restarts run in parallel. Each restart uses its own random number generator, seeded from **seed** and
    /// the restart's index, so the same arguments always produce the same result.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for (`1 <= k <= sample_cnt`)
    /// - **restarts**: Amount of independent restarts (`>= 1`)
    /// - **seed**: Seed for the random number generators
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`ClusteringResult`], containing the best restart's final state.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_hartigan::*;
    ///
    /// let samples = vec![0.0f64, 0.0, 0.1, 0.1, 10.0, 10.0, 10.1, 10.1];
    /// let kmean = KMeans::new(&samples, 4, 2).unwrap();
    /// let result = kmean.fit(2, 5, 42, &KMeansConfig::default()).unwrap();
    ///
    /// assert_eq!(result.assignments[0], result.assignments[1]);
    /// assert_ne!(result.assignments[1], result.assignments[2]);
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Error: {}", result.distsum);
    /// ```
    pub fn fit(&self, k: usize, restarts: usize, seed: u64, config: &KMeansConfig<'_>) -> Result<ClusteringResult> {
        self.validate_k(k)?;
        if restarts == 0 {
            return Err(Error::InvalidParameter { name: "restarts", message: "at least one restart is required" });
        }
        if config.max_iter == 0 {
            return Err(Error::InvalidParameter { name: "max_iter", message: "at least one iteration is required" });
        }

        let runs = (0..restarts).into_par_iter()
            .map(|restart| {
                let mut rnd = StdRng::seed_from_u64(restart_seed(seed, restart));
                crate::variants::Lloyd::calculate(self, k, restart, &mut rnd, config)
            })
            .collect::<Result<Vec<_>>>()?;

        // min_by keeps the first of equal elements -> lowest restart index wins ties
        let best = runs.into_iter()
            .min_by(|r0, r1| r0.distsum.total_cmp(&r1.distsum))
            .ok_or(Error::InvalidParameter { name: "restarts", message: "at least one restart is required" })?;

        info!("k-means (k={}, restarts={}) finished: restart {} won with distsum {:.6} after {} iterations",
            k, restarts, best.restart, best.distsum, best.iterations);
        if !best.converged {
            warn!("k-means (k={}) stopped at the iteration limit ({}) without converging", k, config.max_iter);
        }
        Ok(best)
    }

    /// Choose k using Hartigan's rule with the default threshold of 10.
    /// See [`Hartigan::select_k`] for details.
    pub fn select_k(&self, max_k: usize, restarts: usize, seed: u64, config: &KMeansConfig<'_>) -> Result<HartiganReport> {
        Hartigan::default().select_k(self, max_k, restarts, seed, config)
    }
}

fn widen<T: Primitive>(v: T) -> Option<f64> {
    v.to_f64().filter(|v| v.is_finite())
}

/// Seed of the random number generator of the given restart. Restart 0 uses **seed** itself.
pub(crate) fn restart_seed(seed: u64, restart: usize) -> u64 {
    seed ^ (restart as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
