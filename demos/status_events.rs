use kmeans_hartigan::*;

fn main() -> Result<()> {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 13, 4, 2500);

    // Generate some random data
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

	let conf = KMeansConfig::build()
		.max_iter(max_iter)
		.init(Init::KMeansPlusPlus)
		.abort_strategy(AbortStrategy::NoImprovementForXIterations {
			// Abort after there has not been an improvement for 5 iterations
			x: 5,
			// Only count as improvement if > 0.0005 difference
			threshold: 0.0005,
			// Do not directly abort after a negative improvement
			abort_on_negative: false
		})
		.init_done(&|restart, _| println!("Restart {}: initialization completed.", restart))
		.iteration_done(&|s|
			println!("Restart {} iteration {} - Error: {:.2} | Reassigned: {}",
				s.restart, s.iteration, s.distsum, s.reassigned))
		.build();

    let kmean = KMeans::new(&samples, sample_cnt, sample_dims)?;
    let result = kmean.fit(k, 4, 1234, &conf)?;

    println!("Centroids: {:?}", result.centroids);
    println!("Error: {}", result.distsum);
    Ok(())
}
