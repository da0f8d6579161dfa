//! Sequential clustering used by the scheduler

/// Partition `points` into `buckets` sequential clusters.
///
/// Bucket size is `max(1, len / buckets)`; remainder buckets come back
/// empty and extra chunks beyond `buckets` are truncated. With zero buckets
/// everything lands in one cluster.
pub fn cluster_points<T: Clone>(points: &[T], buckets: usize) -> Vec<Vec<T>> {
    if buckets == 0 {
        return vec![points.to_vec()];
    }
    let bucket_size = (points.len() / buckets).max(1);
    let mut clusters: Vec<Vec<T>> = points.chunks(bucket_size).map(<[T]>::to_vec).collect();
    while clusters.len() < buckets {
        clusters.push(Vec::new());
    }
    clusters.truncate(buckets);
    clusters
}
