use crate::{Error, IterationStatus, KMeans, KMeansConfig, Result};
use crate::{api::{ClusteringResult, KMeansState}, memory::*};
use log::debug;
use rand::prelude::*;

pub(crate) struct Lloyd;
impl Lloyd {
    /// Move every centroid to the mean of its samples. Clusters without samples are re-seeded to a random
    /// sample that does not coincide with any centroid.
    /// ## Returns
    /// Whether a cluster had to be re-seeded
    fn update_centroids(data: &KMeans, state: &mut KMeansState, rnd: &mut dyn RngCore) -> Result<bool> {
        let dims = data.sample_dims;
        let mut new_centroids = vec![0.0f64; state.centroids.len()];

        // Count samples per cluster, while summing all samples of a cluster together into new_centroids
        let (centroid_frequency, assignments) = (&mut state.centroid_frequency, &state.assignments);
        let (used_centroids_cnt, _) = rayon::join(
            || data.update_cluster_frequencies(assignments, centroid_frequency),
            || {
                data.samples.chunks_exact(dims)
                    .zip(assignments.iter().cloned())
                    .for_each(|(s, centroid_id)| {
                        new_centroids.nth_mut(centroid_id, dims).iter_mut()
                            .zip(s.iter())
                            .for_each(|(c, s)| *c += s);
                    });
            });

        // Calculate new centroids from the sums, skipping empty clusters (never divide by 0)
        state.centroids.chunks_exact_mut(dims)
            .zip(new_centroids.chunks_exact(dims))
            .zip(state.centroid_frequency.iter().cloned())
            .filter(|(_, cfreq)| *cfreq > 0)
            .for_each(|((c, nc), cfreq)| {
                let cfreq = cfreq as f64;
                c.iter_mut().zip(nc.iter()).for_each(|(c, nc)| *c = nc / cfreq);
            });

        if used_centroids_cnt == state.k {
            return Ok(false);
        }

        // Re-seed empty clusters. Centroids of the remaining empty clusters are stale and ignored.
        let mut placed: Vec<bool> = state.centroid_frequency.iter().map(|&f| f > 0).collect();
        for cluster in 0..state.k {
            if placed[cluster] {
                continue;
            }
            let candidates: Vec<usize> = (0..data.sample_cnt)
                .filter(|&s| {
                    let sample = data.sample(s);
                    !(0..state.k).any(|c| placed[c] && state.centroids.nth(c, dims) == sample)
                })
                .collect();
            let &chosen = candidates.choose(rnd).ok_or(Error::DegenerateCluster { cluster })?;
            debug!("cluster {} is empty, re-seeding it to sample {}", cluster, chosen);
            state.centroids.set_nth_from_iter(cluster, dims, data.sample(chosen).iter().cloned());
            placed[cluster] = true;
        }
        Ok(true)
    }

    /// One restart of Lloyd's algorithm.
    pub fn calculate(data: &KMeans, k: usize, restart: usize, rnd: &mut dyn RngCore, config: &KMeansConfig<'_>) -> Result<ClusteringResult> {
        let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, k);

        // Initialize clusters and notify subscriber
        config.init.calculate(data, &mut state, rnd)?;
        state.assignments.iter_mut().for_each(|a| *a = usize::MAX);
        (config.init_done)(restart, &state.centroids);
        let mut abort_strategy = config.abort_strategy.create_logic();

        let (mut iterations, mut converged, mut reseeded_last) = (0, false, false);
        for iteration in 1..=config.max_iter {
            if config.is_cancelled() {
                return Err(Error::Cancelled);
            }
            let reassigned = data.update_cluster_assignments(&mut state, None);
            let distsum: f64 = state.centroid_distances.iter().cloned().sum();
            let reseeded = Self::update_centroids(data, &mut state, rnd)?;
            iterations = iteration;
            reseeded_last = reseeded;

            // Notify subscriber about finished iteration
            (config.iteration_done)(&IterationStatus { restart, iteration, distsum, reassigned });
            debug!("restart {} iteration {}: distsum {:.6} ({} reassigned)", restart, iteration, distsum, reassigned);

            // A re-seeded iteration never counts as converged
            if !abort_strategy.next(distsum, reassigned) && !reseeded {
                converged = true;
                break;
            }
        }
        if !converged {
            debug!("restart {} hit the iteration limit ({})", restart, config.max_iter);
        }
        // A cluster re-seeded in the last allowed iteration has no samples yet
        if reseeded_last {
            data.update_cluster_assignments(&mut state, None);
        }

        data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        data.update_centroid_distances(&mut state);
        state.distsum = state.centroid_distances.iter().cloned().sum();
        Ok(ClusteringResult::from_state(state, iterations, converged, restart))
    }
}
