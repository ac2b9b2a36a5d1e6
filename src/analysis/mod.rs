//! Text analysis pipeline for user messages and catalog text.
//!
//! Analysis turns raw text into a normalized token stream: the tokenizer
//! splits on Unicode word boundaries, then a chain of filters lowercases,
//! removes stop words and stems what remains. The same chain is used for
//! extracting query keywords, building the catalog vocabulary and weighting
//! TF-IDF terms, so query tokens and catalog tokens always agree.
//!
//! # Examples
//!
//! ```
//! use marquee::analysis::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<String> = analyzer
//!     .analyze("Concerts happening in Sarajevo")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! // stop words are gone, the rest is stemmed
//! assert_eq!(tokens, vec!["concert", "happen", "sarajevo"]);
//! ```

pub mod analyzer;
pub mod stem;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer, StandardAnalyzer};
pub use stem::{PorterStemmer, StemFilter, Stemmer};
pub use token::{IntoTokenStream, Token, TokenStream};
pub use token_filter::{DEFAULT_ENGLISH_STOP_WORDS_SET, Filter, LowercaseFilter, StopFilter};
pub use tokenizer::{Tokenizer, WordTokenizer};
