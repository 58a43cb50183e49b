//! # kmeans-hartigan - API documentation
//!
//! Small rust library for k-means clustering, and for choosing the amount of clusters k
//! using Hartigan's rule.
//!
//! ## Design target
//! The API-surface is rather plain: samples are given using a raw (row-major) vector, instead of
//! any high-level arithmetics / matrix crate such as nalgebra or ndarray. Loading data, plotting, and
//! comparing clusters against known labels are left to the caller.
//!
//! All calculations are done in [`f64`], with squared euclidean distances.
//!
//! ## K-Means
//! [`KMeans::fit`] runs Lloyd's algorithm: initialize k centroids, assign each sample to its nearest
//! centroid, move each centroid to the mean of its samples, repeat until no sample changes its cluster
//! (or the iteration limit is hit). Since the outcome depends on the initialization, the calculation
//! is restarted multiple times from different random initializations, and the best result (lowest
//! total within-cluster sum of squares) is kept. Restarts run in parallel.
//!
//! Results are reproducible: every restart uses its own random number generator, seeded from the
//! given seed and the restart's index.
//!
//! ## Choosing k
//! [`Hartigan::select_k`] fits k = 1, 2, .. max_k and recommends the smallest k, for which the next
//! additional cluster does not reduce the sum of squares considerably anymore.
//!
//! ## Example
//! ```rust
//! use kmeans_hartigan::*;
//!
//! let (sample_cnt, sample_dims, k) = (2000, 13, 3);
//!
//! // Generate some random data
//! let mut samples = vec![0.0f64; sample_cnt * sample_dims];
//! samples.iter_mut().for_each(|v| *v = rand::random());
//!
//! // Standardize the columns, then keep the best of 25 restarts
//! let kmean = KMeans::new(&samples, sample_cnt, sample_dims).unwrap().standardized();
//! let result = kmean.fit(k, 25, 1234, &KMeansConfig::default()).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Cluster-Assignments: {:?}", result.assignments);
//! println!("Error: {} (converged: {})", result.distsum, result.converged);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans_hartigan::*;
//!
//! let (sample_cnt, sample_dims, k) = (2000, 13, 4);
//!
//! // Generate some random data
//! let mut samples = vec![0.0f64; sample_cnt * sample_dims];
//! samples.iter_mut().for_each(|v| *v = rand::random());
//!
//! let conf = KMeansConfig::build()
//!     .init(Init::KMeansPlusPlus)
//!     .init_done(&|restart, _| println!("Restart {}: initialization completed.", restart))
//!     .iteration_done(&|s| println!("Restart {} iteration {} - Error: {:.2} | Reassigned: {}",
//!         s.restart, s.iteration, s.distsum, s.reassigned))
//!     .build();
//!
//! let kmean = KMeans::new(&samples, sample_cnt, sample_dims).unwrap();
//! let result = kmean.fit(k, 2, 1234, &conf).unwrap();
//! println!("Error: {}", result.distsum);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. To use it, an instance of this struct is created,
//! taking a copy of the sample data (widened to [`f64`]). Calling [`KMeans::fit`] or [`KMeans::select_k`]
//! does not mutate it, so multiple calculations can be done in parallel. Internally, every restart uses its
//! own state, the best of which is returned as [`ClusteringResult`].
//!
//! Invalid arguments are rejected before any calculation starts, with an [`Error`] of kind
//! [`ErrorKind::InvalidArgument`]. Hitting the iteration limit is not an error, but reported through
//! [`ClusteringResult::converged`].

#[macro_use] mod helpers;
mod memory;
mod error;
mod api;
mod variants;
mod inits;
mod abort_strategy;
mod hartigan;
mod scale;

pub use abort_strategy::AbortStrategy;
pub use api::{ClusteringResult, IterationStatus, KMeans, KMeansConfig, KMeansConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use hartigan::{Hartigan, HartiganReport, HartiganRow};
pub use inits::Init;
pub use memory::Primitive;
