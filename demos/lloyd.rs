use kmeans_hartigan::*;

fn main() -> Result<()> {
    let (sample_cnt, sample_dims, k, restarts) = (20000, 13, 3, 25);

    // Generate some random data
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

    // Standardize, then keep the best of 25 randomly initialized restarts
    let kmean = KMeans::new(&samples, sample_cnt, sample_dims)?.standardized();
    let result = kmean.fit(k, restarts, 1234, &KMeansConfig::default())?;

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster sizes: {:?}", result.centroid_frequency);
    println!("Error: {} (restart {}, {} iterations, converged: {})",
        result.distsum, result.restart, result.iterations, result.converged);
    Ok(())
}
