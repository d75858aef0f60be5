use kmeans_partitioned::*;

fn main() -> Result<()> {
    let (sample_cnt, k, max_iter) = (20000, 4, 2500);

    // Generate some random data
    let samples: Vec<Point<f64>> = (0..sample_cnt)
        .map(|_| Point::new(rand::random(), rand::random()))
        .collect();

    let conf = KMeansConfig::build()
        .init_done(&|_| println!("Initialization completed."))
        .iteration_done(&|s, nr, new_distsum|
            println!("Iteration {} - Error: {:.2} -> {:.2} | Shift: {:e}",
                nr, s.distsum, new_distsum, s.shift))
        .build();

    // Four contiguous partitions, seeded from random samples
    let kmean = KMeans::new(samples);
    let result = kmean.kmeans_partitioned(4, k, max_iter, KMeans::init_random_sample, &conf)?;

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster-Frequencies: {:?}", result.centroid_frequency);
    println!("Error: {}", result.distsum);
    Ok(())
}
