/// Center every column of the row-major **samples** to a mean of 0 and scale it to a sample
/// standard deviation (`n - 1` denominator) of 1. Constant columns (and all columns of a
/// single-sample dataset) are only centered, which leaves them all zeros.
pub(crate) fn standardize(samples: &[f64], sample_cnt: usize, sample_dims: usize) -> Vec<f64> {
    let mut means = vec![0.0f64; sample_dims];
    samples.chunks_exact(sample_dims).for_each(|s| {
        means.iter_mut().zip(s.iter()).for_each(|(m, v)| *m += v);
    });
    means.iter_mut().for_each(|m| *m /= sample_cnt as f64);

    let mut sds = vec![0.0f64; sample_dims];
    if sample_cnt > 1 {
        samples.chunks_exact(sample_dims).for_each(|s| {
            sds.iter_mut().zip(s.iter().zip(means.iter()))
                .for_each(|(sd, (v, m))| *sd += (v - m) * (v - m));
        });
        sds.iter_mut().for_each(|sd| *sd = (*sd / (sample_cnt - 1) as f64).sqrt());
    }

    samples.chunks_exact(sample_dims)
        .flat_map(|s| {
            s.iter().zip(means.iter().zip(sds.iter()))
                .map(|(v, (m, sd))| if *sd > 0.0 { (v - m) / sd } else { 0.0 })
        })
        .collect()
}
