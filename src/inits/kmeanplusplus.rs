use crate::{Error, KMeans, Result};
use crate::{api::KMeansState, memory::*};
use rand::distributions::WeightedIndex;
use rand::prelude::*;

#[inline(always)]
pub(crate) fn calculate(kmean: &KMeans, state: &mut KMeansState, rnd: &mut dyn RngCore) -> Result<()> {
    let dims = kmean.sample_dims;
    {
        // Randomly select first centroid
        let first_idx = rnd.gen_range(0..kmean.sample_cnt);
        state.centroids.set_nth_from_iter(0, dims, kmean.sample(first_idx).iter().cloned());
    }
    for k in 1..state.k {
        // For each following centroid...
        // Calculate distances & update cluster-assignments
        kmean.update_cluster_assignments(state, Some(k));

        // Samples coinciding with a chosen centroid have weight 0. If all of them do, there
        // are less distinct samples than requested clusters.
        let distsum: f64 = state.centroid_distances.iter().cloned().sum();
        if distsum <= 0.0 {
            return Err(Error::DegenerateCluster { cluster: k });
        }
        // Use rand's WeightedIndex to randomly draw a centroid, while respecting their probabilities
        let centroid_index = WeightedIndex::new(state.centroid_distances.iter().map(|d| d / distsum))
            .map_err(|_| Error::DegenerateCluster { cluster: k })?;
        let sampled_centroid_id = centroid_index.sample(rnd);
        state.centroids.set_nth_from_iter(k, dims, kmean.sample(sampled_centroid_id).iter().cloned());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, KMeansConfig, Init};

    #[test]
    fn spreads_centroids_over_groups() {
        // three tight groups, far apart: every draw after the first lands in an unoccupied group
        let samples = vec![0.0f64, 0.1, 0.2, 100.0, 100.1, 100.2, 200.0, 200.1, 200.2];
        let kmean = KMeans::new(&samples, 9, 1).unwrap();
        for seed in 0..10 {
            let mut state = KMeansState::new(9, 1, 3);
            calculate(&kmean, &mut state, &mut StdRng::seed_from_u64(seed)).unwrap();
            let mut groups: Vec<i64> = state.centroids.iter().map(|c| (c / 100.0).round() as i64).collect();
            groups.sort_unstable();
            assert_eq!(groups, vec![0, 1, 2]);
        }
    }

    #[test]
    fn too_few_distinct_samples() {
        let kmean = KMeans::new(&[1.0f64, 1.0, 1.0, 2.0], 4, 1).unwrap();
        let conf = KMeansConfig::build().init(Init::KMeansPlusPlus).build();
        let err = kmean.fit(3, 1, 0, &conf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(err, Error::DegenerateCluster { .. }));
        assert!(kmean.fit(2, 1, 0, &conf).is_ok());
    }
}
