//! Brute-force nearest-neighbor index over feature vectors.
//!
//! The catalog is small and fixed at startup, so a flat scan beats any
//! approximate structure: add every vector once, then [`FlatIndex::search`]
//! ranks the whole set by distance to the query vector.

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};

/// Distance between two equal-length feature vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Cosine,
    Manhattan,
}

impl DistanceMetric {
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Manhattan => "manhattan",
        }
    }

    /// Distance between `a` and `b`. Callers guarantee equal lengths.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f32>()
                .sqrt(),
            DistanceMetric::Cosine => {
                let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
                let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    // A zero vector is maximally far from everything.
                    1.0
                } else {
                    1.0 - dot / (norm_a * norm_b)
                }
            }
            DistanceMetric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
        }
    }
}

/// One ranked search hit: position of the vector in insertion order plus
/// its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub ordinal: usize,
    pub distance: f32,
}

/// Exhaustive-scan index with a fixed dimension.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    vectors: Vec<Vec<f32>>,
    metric: DistanceMetric,
    dimension: usize,
}

impl FlatIndex {
    pub fn new(metric: DistanceMetric) -> FlatIndex {
        FlatIndex {
            vectors: Vec::new(),
            metric,
            dimension: 0,
        }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension of the stored vectors; 0 while the index is empty.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Append one vector. The first vector fixes the index dimension.
    pub fn add(&mut self, vector: Vec<f32>) -> Result<()> {
        if self.vectors.is_empty() {
            self.dimension = vector.len();
        } else if vector.len() != self.dimension {
            return Err(MarqueeError::encoding(format!(
                "vector dimension {} does not match index dimension {}",
                vector.len(),
                self.dimension
            )));
        }
        self.vectors.push(vector);
        Ok(())
    }

    /// The `k` nearest stored vectors, nearest first. Ties break on
    /// insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(MarqueeError::encoding(format!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(ordinal, vector)| Neighbor {
                ordinal,
                distance: self.metric.distance(query, vector),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.ordinal.cmp(&b.ordinal))
        });
        neighbors.truncate(k);
        Ok(neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(vectors: &[&[f32]], metric: DistanceMetric) -> FlatIndex {
        let mut index = FlatIndex::new(metric);
        for v in vectors {
            index.add(v.to_vec()).unwrap();
        }
        index
    }

    #[test]
    fn test_euclidean_ordering() {
        let index = index_with(
            &[&[0.0, 3.0], &[0.0, 1.0], &[0.0, 2.0]],
            DistanceMetric::Euclidean,
        );
        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        let ordinals: Vec<usize> = hits.iter().map(|n| n.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 0]);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_k_caps_the_result() {
        let index = index_with(&[&[1.0], &[2.0], &[3.0], &[4.0]], DistanceMetric::Euclidean);
        assert_eq!(index.search(&[0.0], 2).unwrap().len(), 2);
        assert_eq!(index.search(&[0.0], 10).unwrap().len(), 4);
        assert!(index.search(&[0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_break_on_insertion_order() {
        let index = index_with(&[&[1.0], &[-1.0]], DistanceMetric::Euclidean);
        let hits = index.search(&[0.0], 2).unwrap();
        assert_eq!(hits[0].ordinal, 0);
        assert_eq!(hits[1].ordinal, 1);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let mut index = FlatIndex::new(DistanceMetric::Euclidean);
        index.add(vec![1.0, 2.0]).unwrap();
        assert!(index.add(vec![1.0]).is_err());
        assert!(index.search(&[1.0], 1).is_err());
    }

    #[test]
    fn test_empty_index_returns_nothing() {
        let index = FlatIndex::new(DistanceMetric::Euclidean);
        assert!(index.search(&[1.0], 5).unwrap().is_empty());
    }

    #[test]
    fn test_cosine_distance() {
        let metric = DistanceMetric::Cosine;
        assert!((metric.distance(&[1.0, 0.0], &[2.0, 0.0])).abs() < 1e-6);
        assert!((metric.distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(metric.distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn test_manhattan_distance() {
        let metric = DistanceMetric::Manhattan;
        assert_eq!(metric.distance(&[1.0, 2.0], &[3.0, 0.0]), 4.0);
    }
}
