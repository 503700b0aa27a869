//! Markov chain text generation library.
//!
//! This crate provides an in-memory, order-N Markov chain over
//! whitespace-delimited tokens, including:
//! - Phrase learning, single and batched (optionally on several threads)
//! - Weighted and unweighted next-token sampling
//! - Bounded, optionally deduplicated multi-line generation
//!
//! The model lives as long as its `MarkovGenerator`; it is never persisted.
//!
//! ```
//! use markov_core::model::generator::MarkovGenerator;
//!
//! let generator = MarkovGenerator::new(2)?;
//! generator.learn_many(["the cat sat on the rug", "the dog sat on the mat"]);
//! for line in generator.walk(2, "")? {
//!     println!("{line}");
//! }
//! # Ok::<(), markov_core::error::MarkovError>(())
//! ```

/// Markov chain, sampling and generation logic.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

pub use error::{MarkovError, Result};
pub use model::generator::MarkovGenerator;
