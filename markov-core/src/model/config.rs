use serde::Deserialize;

use crate::error::{MarkovError, Result};

/// Hard upper bound on the number of tokens generated for a single line.
///
/// Densely connected chains can cycle forever; this stops them.
pub const MAX_GENERATED_TOKENS: usize = 1500;

/// Default number of walker attempts allowed per requested line.
pub const DEFAULT_ATTEMPTS_PER_LINE: usize = 10;

/// Default chain order.
pub const DEFAULT_ORDER: usize = 2;

/// Settings of a `MarkovGenerator`.
///
/// # Responsibilities
/// - Fix the chain order (context length) for the lifetime of a generator
/// - Control whether generated lines must be new (`ensure_unique`)
/// - Bound generation (`max_tokens` per line, `attempts_per_line` per walk)
///
/// # Invariants
/// - `order >= 1`
/// - `1 <= max_tokens <= MAX_GENERATED_TOKENS`
/// - `attempts_per_line >= 1`
///
/// A deserialized config may break these; call [`GeneratorConfig::validate`]
/// before using it (`MarkovGenerator::with_config` does).
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Number of preceding tokens used as lookup context.
	order: usize,

	/// Discard generated lines equal to a learned phrase or to a line
	/// already produced in the same walk.
	pub ensure_unique: bool,

	/// Maximum number of generated tokens per line.
	max_tokens: usize,

	/// Walker invocations allowed per requested line.
	attempts_per_line: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			order: DEFAULT_ORDER,
			ensure_unique: false,
			max_tokens: MAX_GENERATED_TOKENS,
			attempts_per_line: DEFAULT_ATTEMPTS_PER_LINE,
		}
	}
}

impl GeneratorConfig {
	/// Creates a default config with the given order.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn with_order(order: usize) -> Result<Self> {
		let mut config = Self::default();
		config.set_order(order)?;
		Ok(config)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn max_tokens(&self) -> usize {
		self.max_tokens
	}

	pub fn attempts_per_line(&self) -> usize {
		self.attempts_per_line
	}

	/// Sets the chain order.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order < 1 {
			return Err(MarkovError::InvalidArgument("order must be >= 1".to_owned()));
		}
		self.order = order;
		Ok(())
	}

	/// Sets the per-line token cap.
	///
	/// The cap can be lowered but never raised above `MAX_GENERATED_TOKENS`.
	///
	/// # Errors
	/// Returns an error if the value is outside `1..=MAX_GENERATED_TOKENS`.
	pub fn set_max_tokens(&mut self, max_tokens: usize) -> Result<()> {
		if !(1..=MAX_GENERATED_TOKENS).contains(&max_tokens) {
			return Err(MarkovError::InvalidArgument(format!(
				"max_tokens must be between 1 and {MAX_GENERATED_TOKENS}, got {max_tokens}"
			)));
		}
		self.max_tokens = max_tokens;
		Ok(())
	}

	/// Sets the number of walker attempts allowed per requested line.
	///
	/// # Errors
	/// Returns an error if the value is 0.
	pub fn set_attempts_per_line(&mut self, attempts: usize) -> Result<()> {
		if attempts < 1 {
			return Err(MarkovError::InvalidArgument("attempts_per_line must be >= 1".to_owned()));
		}
		self.attempts_per_line = attempts;
		Ok(())
	}

	/// Checks every invariant, typically after deserialization.
	pub fn validate(&self) -> Result<()> {
		let mut checked = Self::default();
		checked.set_order(self.order)?;
		checked.set_max_tokens(self.max_tokens)?;
		checked.set_attempts_per_line(self.attempts_per_line)?;
		Ok(())
	}
}
