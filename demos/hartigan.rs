use kmeans_hartigan::*;
use rand::prelude::*;

fn main() -> Result<()> {
    // Four groups of 50 samples each, in 2 dimensions
    let centers = [(0.0, 0.0), (6.0, 0.0), (0.0, 6.0), (6.0, 6.0)];
    let mut rnd = StdRng::seed_from_u64(7);
    let rows: Vec<[f64; 2]> = centers.iter()
        .flat_map(|&(cx, cy)| (0..50).map(move |_| (cx, cy)))
        .map(|(cx, cy)| [cx + rnd.gen_range(-1.0..1.0), cy + rnd.gen_range(-1.0..1.0)])
        .collect();

    let kmean = KMeans::from_rows(&rows)?;
    let report = Hartigan::default()
        .threshold(10.0)
        .select_k(&kmean, 8, 25, 1234, &KMeansConfig::default())?;

    println!("{:>3} {:>12} {:>10}", "k", "SS", "H(k)");
    for row in &report.rows {
        let index = row.index.map(|h| format!("{:.2}", h)).unwrap_or_default();
        println!("{:>3} {:>12.3} {:>10}", row.k, row.distsum, index);
    }
    println!("Recommended k: {}{}", report.recommended_k, if report.inconclusive { " (inconclusive)" } else { "" });
    Ok(())
}
