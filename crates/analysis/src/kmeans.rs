//! Lloyd's k-means with k-means++ seeding.
//!
//! Several seeded restarts run and the lowest-inertia fit wins. Cluster ids
//! are renumbered by ascending centroid so the labeling does not depend on
//! which restart won.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    pub k: usize,
    pub restarts: usize,
    pub max_iter: usize,
    pub seed: u64,
}

impl KMeans {
    pub fn new(k: usize, seed: u64) -> Self {
        Self {
            k,
            restarts: 10,
            max_iter: 300,
            seed,
        }
    }

    pub fn fit(&self, points: &[Vec<f64>]) -> Result<Fit, AnalysisError> {
        validate(points, self.k)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<Fit> = None;
        for _ in 0..self.restarts.max(1) {
            let centroids = plus_plus(points, self.k, &mut rng);
            let fit = lloyd(points, centroids, self.max_iter);
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        best.map(relabel)
            .ok_or_else(|| AnalysisError::Cluster("no restarts ran".into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub inertia: f64,
    pub iterations: usize,
}

fn validate(points: &[Vec<f64>], k: usize) -> Result<(), AnalysisError> {
    if k == 0 {
        return Err(AnalysisError::Cluster("cluster count must be positive".into()));
    }
    if points.len() < k {
        return Err(AnalysisError::Cluster(format!(
            "{} samples, need at least {k}",
            points.len()
        )));
    }
    let dim = points[0].len();
    if dim == 0 {
        return Err(AnalysisError::Cluster("no features".into()));
    }
    for (i, p) in points.iter().enumerate() {
        if p.len() != dim {
            return Err(AnalysisError::Cluster(format!("row {i} has {} features, expected {dim}", p.len())));
        }
        if p.iter().any(|x| !x.is_finite()) {
            return Err(AnalysisError::Cluster(format!("row {i} has a non-finite feature")));
        }
    }
    Ok(())
}

fn sq_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (idx, c) in centroids.iter().enumerate() {
        let d = sq_dist(point, c);
        if d < best.1 {
            best = (idx, d);
        }
    }
    best
}

/// First center uniform, each next one drawn with probability proportional to
/// squared distance from the nearest chosen center.
fn plus_plus<R: Rng + ?Sized>(points: &[Vec<f64>], k: usize, rng: &mut R) -> Vec<Vec<f64>> {
    let mut centroids = vec![points[rng.gen_range(0..points.len())].clone()];
    while centroids.len() < k {
        let weights: Vec<f64> = points.iter().map(|p| nearest(p, &centroids).1).collect();
        let idx = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            // Every point already coincides with a center
            Err(_) => rng.gen_range(0..points.len()),
        };
        centroids.push(points[idx].clone());
    }
    centroids
}

fn lloyd(points: &[Vec<f64>], mut centroids: Vec<Vec<f64>>, max_iter: usize) -> Fit {
    let k = centroids.len();
    let dim = centroids[0].len();
    let mut labels: Vec<usize> = points.iter().map(|p| nearest(p, &centroids).0).collect();
    let mut iterations = 0;

    while iterations < max_iter {
        iterations += 1;

        let mut sums = vec![vec![0.0; dim]; k];
        let mut counts = vec![0usize; k];
        for (p, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for (s, x) in sums[label].iter_mut().zip(p) {
                *s += x;
            }
        }
        for (c, (sum, count)) in centroids.iter_mut().zip(sums.into_iter().zip(counts)) {
            // Empty clusters keep their previous centroid
            if count > 0 {
                *c = sum.into_iter().map(|s| s / count as f64).collect();
            }
        }

        let next: Vec<usize> = points.iter().map(|p| nearest(p, &centroids).0).collect();
        if next == labels {
            break;
        }
        labels = next;
    }

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(p, &l)| sq_dist(p, &centroids[l]))
        .sum();
    Fit {
        labels,
        centroids,
        inertia,
        iterations,
    }
}

/// Renumber clusters by ascending centroid, compared component-wise.
///
/// Clusters without members (duplicate seeds when there are fewer distinct
/// points than `k`) are dropped, so ids always run `0..m` with no gaps.
fn relabel(fit: Fit) -> Fit {
    let mut occupied = vec![false; fit.centroids.len()];
    for &l in &fit.labels {
        occupied[l] = true;
    }

    let mut order: Vec<usize> = (0..fit.centroids.len()).filter(|&i| occupied[i]).collect();
    order.sort_by(|&a, &b| {
        fit.centroids[a]
            .iter()
            .zip(&fit.centroids[b])
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut new_id = vec![0; fit.centroids.len()];
    for (new, &old) in order.iter().enumerate() {
        new_id[old] = new;
    }

    Fit {
        labels: fit.labels.iter().map(|&l| new_id[l]).collect(),
        centroids: order.iter().map(|&i| fit.centroids[i].clone()).collect(),
        inertia: fit.inertia,
        iterations: fit.iterations,
    }
}
