//! # Marquee
//!
//! A question answering chatbot core for event catalogs.
//!
//! ## Features
//!
//! - Rule-based intent classification with catalog-derived vocabulary
//! - Entity and time extraction (locations, time windows, prices, keywords)
//! - Conjunctive and disjunctive criteria matching
//! - One-hot + TF-IDF nearest-neighbor fallback recommendations
//! - Stateless message orchestration

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod intent;
pub mod matching;
pub mod recommend;
pub mod respond;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
