//! Similarity-based fallback recommendation.
//!
//! When a message classifies as an inquiry but carries no usable criteria,
//! the engine falls back to nearest-neighbor retrieval: every catalog event
//! is encoded once at build time ([`FeatureEncoder`]), the query is encoded
//! with the same fitted vocabularies, and a flat index returns the k
//! nearest events. A catalog too small to fit (i.e. empty) disables the
//! recommender instead of failing the engine.

pub mod encoder;
pub mod index;

pub use encoder::FeatureEncoder;
pub use index::{DistanceMetric, FlatIndex, Neighbor};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::analysis::Analyzer;
use crate::catalog::{Catalog, EventRecord};
use crate::error::Result;

/// Fitted encoder plus index over the catalog, built once at startup.
pub struct Recommender {
    catalog: Arc<Catalog>,
    encoder: Option<FeatureEncoder>,
    index: FlatIndex,
}

impl Recommender {
    /// Fit the feature space and index every catalog event.
    ///
    /// Never fails: a catalog that cannot be fitted produces a disabled
    /// recommender whose [`Recommender::recommend`] returns nothing.
    pub fn build(
        catalog: Arc<Catalog>,
        analyzer: Arc<dyn Analyzer>,
        metric: DistanceMetric,
        max_terms: usize,
    ) -> Recommender {
        match fit_index(&catalog, analyzer, metric, max_terms) {
            Ok((encoder, index)) => Recommender {
                catalog,
                encoder: Some(encoder),
                index,
            },
            Err(error) => {
                debug!(%error, "similarity recommender disabled");
                Recommender {
                    catalog,
                    encoder: None,
                    index: FlatIndex::new(metric),
                }
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.encoder.is_some()
    }

    pub fn metric(&self) -> DistanceMetric {
        self.index.metric()
    }

    /// The `k` catalog events nearest to the message, nearest first.
    pub fn recommend(&self, message: &str, k: usize) -> Vec<&EventRecord> {
        let Some(encoder) = &self.encoder else {
            return Vec::new();
        };
        let query = match encoder.encode_query(message) {
            Ok(query) => query,
            Err(error) => {
                warn!(%error, "query encoding failed");
                return Vec::new();
            }
        };
        match self.index.search(&query, k) {
            Ok(neighbors) => neighbors
                .iter()
                .filter_map(|n| self.catalog.get(n.ordinal))
                .collect(),
            Err(error) => {
                warn!(%error, "neighbor search failed");
                Vec::new()
            }
        }
    }
}

fn fit_index(
    catalog: &Catalog,
    analyzer: Arc<dyn Analyzer>,
    metric: DistanceMetric,
    max_terms: usize,
) -> Result<(FeatureEncoder, FlatIndex)> {
    let encoder = FeatureEncoder::fit(catalog, analyzer, max_terms)?;
    let mut index = FlatIndex::new(metric);
    for event in catalog {
        index.add(encoder.encode_event(event)?)?;
    }
    Ok((encoder, index))
}
