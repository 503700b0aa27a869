//! Top-level module for the Markov text generation engine.
//!
//! This module provides an order-N Markov chain over space-delimited tokens:
//! - Tokenization and context keys (`tokenizer`)
//! - The concurrent transition store (`Chain`)
//! - Weighted and unweighted sampling strategies (`UnigramSelector`)
//! - Generator settings (`GeneratorConfig`)
//! - The high-level learn/generate interface (`MarkovGenerator`)
//! - Lazy, bounded multi-line generation (`Walk`)

/// High-level interface: learning phrases and generating lines.
pub mod generator;

/// Concurrent mapping from context key to observed continuations.
///
/// Supports atomic per-key insert-or-append and transition statistics.
pub mod chain;

/// Weighted / unweighted selection of the next token.
pub mod selector;

/// Phrase splitting, phrase rebuilding and context key construction.
pub mod tokenizer;

/// Multi-line generation with an attempt budget and optional uniqueness.
pub mod walk;

/// Generator settings: order, uniqueness and generation bounds.
pub mod config;
