//! Drives partitioned rounds the way an external job runner would: partitions arrive as text lines, every round
//! broadcasts the centroids as text, partitions answer with `sum_x,sum_y,count` records, and the driver reduces.
use kmeans_partitioned::{codec, partitioned, Point, Result, EPSILON, MAX_ITERATIONS};
use rand::prelude::*;
use tracing::{info, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let (partition_cnt, points_per_partition, k) = (6, 5000, 5);

    let mut rnd = StdRng::seed_from_u64(42);
    let text_partitions: Vec<Vec<String>> = (0..partition_cnt)
        .map(|_| (0..points_per_partition)
            .map(|_| Point::<f64>::new(rnd.gen_range(0.0, 100.0), rnd.gen_range(0.0, 100.0)).to_string())
            .collect())
        .collect();

    // Every partition decodes its own records; bad lines would be skipped
    let partitions: Vec<Vec<Point<f64>>> = text_partitions.iter()
        .map(|lines| codec::decode_points(lines).records)
        .collect();

    // Seed with the first k points of the first partition
    let mut centroids = partitions[0][..k].to_vec();
    for round in 1..=MAX_ITERATIONS {
        let broadcast = codec::encode_centroids(&centroids);
        let received: Vec<Point<f64>> = broadcast.decode()?;

        // Map + combine per partition, shipped as text to the reducer
        let shuffled: Vec<Vec<String>> = partitions.iter()
            .map(|points| {
                let labelled = partitioned::assign_partition(points, &received);
                partitioned::combine_partition(&labelled).into_iter()
                    .map(|(idx, aggregate)| format!("{}\t{}", idx, aggregate))
                    .collect()
            })
            .collect();

        let outputs: Vec<partitioned::CombineOutput<f64>> = shuffled.iter()
            .map(|lines| lines.iter()
                .filter_map(|line| {
                    let (idx, record) = line.split_once('\t')?;
                    Some((idx.parse().ok()?, record.parse().ok()?))
                })
                .collect())
            .collect();

        let next = partitioned::reduce_round(&received, &outputs);
        let shift = received.iter().zip(next.iter()).map(|(a, b)| a.distance(b)).fold(0.0, f64::max);
        info!(round, shift, "round finished");
        centroids = next;
        if shift <= EPSILON {
            break;
        }
    }

    for line in codec::encode_centroids(&centroids).lines {
        println!("{}", line);
    }
    Ok(())
}
