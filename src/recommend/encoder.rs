//! Feature encoding of events and queries into a shared vector space.
//!
//! The layout is fitted once over the full catalog and then frozen: a
//! one-hot block per categorical field (city, category, genre), each with a
//! trailing "unknown" bucket, followed by a TF-IDF block over the most
//! frequent description terms. Every event vector and every query vector
//! share this exact layout; refitting per query is forbidden because it
//! would make the two sides incomparable.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::analysis::{Analyzer, LowercaseFilter, PipelineAnalyzer, Token, WordTokenizer};
use crate::catalog::{Catalog, EventRecord};
use crate::error::{MarqueeError, Result};
use crate::extract::Gazetteer;

/// Fitted encoder with a frozen vector layout.
pub struct FeatureEncoder {
    analyzer: Arc<dyn Analyzer>,
    surface: PipelineAnalyzer,
    cities: Vec<String>,
    categories: Vec<String>,
    genres: Vec<String>,
    city_phrases: Gazetteer,
    category_phrases: Gazetteer,
    genre_phrases: Gazetteer,
    terms: Vec<String>,
    term_slots: AHashMap<String, usize>,
    idf: Vec<f32>,
}

impl FeatureEncoder {
    /// Fit vocabularies over the catalog.
    ///
    /// Categorical vocabularies are the sorted distinct values of each
    /// field; the term vocabulary keeps the `max_terms` description stems
    /// with the highest document frequency (ties alphabetical). Fails on an
    /// empty catalog, where no vocabulary exists to fit.
    pub fn fit(
        catalog: &Catalog,
        analyzer: Arc<dyn Analyzer>,
        max_terms: usize,
    ) -> Result<FeatureEncoder> {
        if catalog.is_empty() {
            return Err(MarqueeError::encoding(
                "cannot fit feature space over an empty catalog",
            ));
        }

        let cities = catalog.distinct_cities();
        let categories = catalog.distinct_categories();
        let genres = catalog.distinct_genres();

        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        for event in catalog {
            let distinct: AHashSet<String> = analyze_terms(analyzer.as_ref(), &event.description)?
                .into_iter()
                .collect();
            for term in distinct {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = document_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_terms);
        // Frequency picked the vocabulary; the layout itself is alphabetical.
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let documents = catalog.len() as f32;
        let idf = ranked
            .iter()
            .map(|(_, df)| ((documents + 1.0) / (*df as f32 + 1.0)).ln() + 1.0)
            .collect();
        let terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        let term_slots = terms
            .iter()
            .enumerate()
            .map(|(slot, term)| (term.clone(), slot))
            .collect();

        let surface = PipelineAnalyzer::new(Arc::new(WordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("surface");

        Ok(FeatureEncoder {
            analyzer,
            surface,
            city_phrases: Gazetteer::empty().with_places(&cities),
            category_phrases: Gazetteer::empty().with_places(&categories),
            genre_phrases: Gazetteer::empty().with_places(&genres),
            cities,
            categories,
            genres,
            terms,
            term_slots,
            idf,
        })
    }

    /// Total vector length shared by events and queries.
    pub fn dimension(&self) -> usize {
        self.cities.len() + 1 + self.categories.len() + 1 + self.genres.len() + 1 + self.terms.len()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Encode one catalog event.
    pub fn encode_event(&self, event: &EventRecord) -> Result<Vec<f32>> {
        let mut vector = Vec::with_capacity(self.dimension());
        push_one_hot(&mut vector, &self.cities, Some(&event.city));
        push_one_hot(&mut vector, &self.categories, Some(&event.category));
        push_one_hot(&mut vector, &self.genres, Some(&event.genre));
        self.push_terms(&mut vector, &event.description)?;
        Ok(vector)
    }

    /// Encode a free-text query with the fitted vocabularies.
    ///
    /// The city slot comes from the first catalog city named in the
    /// message, the category and genre slots from the first catalog value
    /// appearing verbatim; anything absent or unseen lands in the unknown
    /// bucket.
    pub fn encode_query(&self, message: &str) -> Result<Vec<f32>> {
        let tokens: Vec<Token> = self.surface.analyze(message)?.collect();

        let city = self.city_phrases.scan(&tokens).into_iter().next();
        let category = self.category_phrases.scan(&tokens).into_iter().next();
        let genre = self.genre_phrases.scan(&tokens).into_iter().next();

        let mut vector = Vec::with_capacity(self.dimension());
        push_one_hot(&mut vector, &self.cities, city.as_deref());
        push_one_hot(&mut vector, &self.categories, category.as_deref());
        push_one_hot(&mut vector, &self.genres, genre.as_deref());
        self.push_terms(&mut vector, message)?;
        Ok(vector)
    }

    /// Append the TF-IDF block for `text`.
    fn push_terms(&self, vector: &mut Vec<f32>, text: &str) -> Result<()> {
        let offset = vector.len();
        vector.resize(offset + self.terms.len(), 0.0);

        let stems = analyze_terms(self.analyzer.as_ref(), text)?;
        if stems.is_empty() {
            return Ok(());
        }
        let total = stems.len() as f32;
        let mut counts: AHashMap<usize, usize> = AHashMap::new();
        for stem in &stems {
            if let Some(&slot) = self.term_slots.get(stem) {
                *counts.entry(slot).or_default() += 1;
            }
        }
        for (slot, count) in counts {
            vector[offset + slot] = (count as f32 / total) * self.idf[slot];
        }
        Ok(())
    }
}

/// One-hot block: one slot per known value plus a trailing unknown bucket.
fn push_one_hot(vector: &mut Vec<f32>, values: &[String], value: Option<&str>) {
    let offset = vector.len();
    vector.resize(offset + values.len() + 1, 0.0);
    let slot = value
        .and_then(|v| values.binary_search_by(|probe| probe.as_str().cmp(v)).ok())
        .unwrap_or(values.len());
    vector[offset + slot] = 1.0;
}

fn analyze_terms(analyzer: &dyn Analyzer, text: &str) -> Result<Vec<String>> {
    Ok(analyzer.analyze(text)?.map(|token| token.text).collect())
}
