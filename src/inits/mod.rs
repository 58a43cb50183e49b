use crate::{KMeans, Result};
use crate::api::KMeansState;
use rand::RngCore;

pub(crate) mod kmeanplusplus;
pub(crate) mod randomsample;

/// Centroid initialization methods.
///
/// The outcome of each k-means restart depends on the initialization of its clusters. Both methods
/// draw from the restart's own seeded random number generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Init {
    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method selects k distinct samples uniformly at random (without replacement)
    /// as initial centroids.
    RandomSample,
    /// K-Means++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by selecting one sample as first centroid.
    /// Proceeding from there, the method iteratively selects one new centroid (per iteration) by calculating
    /// each sample's probability of "being a centroid". This probability is bigger, the farther away a sample
    /// is from its nearest centroid. This leads to a tendency of selecting centroids, that are far away from
    /// the already chosen ones.
    ///
    /// Fails with [`crate::Error::DegenerateCluster`] when the dataset has less than k distinct samples.
    KMeansPlusPlus,
}
impl Default for Init {
    fn default() -> Self { Init::RandomSample }
}
impl Init {
    pub(crate) fn calculate(&self, kmean: &KMeans, state: &mut KMeansState, rnd: &mut dyn RngCore) -> Result<()> {
        match self {
            Init::RandomSample => randomsample::calculate(kmean, state, rnd),
            Init::KMeansPlusPlus => kmeanplusplus::calculate(kmean, state, rnd),
        }
    }
}
