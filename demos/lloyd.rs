use kmeans_partitioned::*;

fn main() -> Result<()> {
    let (sample_cnt, k, max_iter) = (20000, 4, 100);

    // Generate some random data
    let samples: Vec<Point<f64>> = (0..sample_cnt)
        .map(|_| Point::new(rand::random(), rand::random()))
        .collect();

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::new(samples);
    let result = kmean.kmeans_lloyd(k, max_iter, KMeans::init_kmeanplusplus, &KMeansConfig::default())?;

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster-Frequencies: {:?}", result.centroid_frequency);
    println!("Error: {}", result.distsum);
    println!("Rounds: {} (converged: {})", result.iterations, result.converged);
    Ok(())
}
