use crate::{KMeans, Result};
use crate::{api::KMeansState, memory::*};
use rand::prelude::*;

#[inline(always)]
pub(crate) fn calculate(kmean: &KMeans, state: &mut KMeansState, rnd: &mut dyn RngCore) -> Result<()> {
    let dims = kmean.sample_dims;
    kmean.samples.chunks_exact(dims)
        .choose_multiple(rnd, state.k).iter().cloned()
        .enumerate()
        .for_each(|(ci, c)| { // Copy randomly chosen centroids into state.centroids
            state.centroids.set_nth_from_iter(ci, dims, c.iter().cloned());
        });
    Ok(())
}
