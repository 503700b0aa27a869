use crate::model::tokenizer::ContextKey;

/// Errors surfaced by the Markov engine.
///
/// Most "nothing to do" situations (empty phrases, phrases shorter than the
/// chain order, a line ending because no continuation exists) are silent
/// no-ops and never reach this type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MarkovError {
	/// A caller supplied a value outside its valid range
	/// (order 0, line count 0, an out-of-range config value).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// `Chain::get` was called on a context key that was never stored.
	#[error("context key not found: {0}")]
	KeyNotFound(ContextKey),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
