use std::collections::HashMap;

use dashmap::DashMap;
use rand::Rng;

use crate::error::{MarkovError, Result};
use super::selector::UnigramSelector;
use super::tokenizer::{ContextKey, Token};

/// Concurrent store mapping a context key to every token observed after it.
///
/// Conceptually this is the edge set of the Markov chain: each key is a state
/// and its outcome list holds one entry per observed transition, duplicates
/// included, so frequencies survive for weighted sampling.
///
/// ## Invariants
/// - An outcome list is never empty while its key exists
/// - Entries are only ever appended to, never removed or rewritten
///
/// ## Concurrency
/// Insert-or-append for one key runs under that key's shard write lock, so
/// concurrent learners never lose a token. Unrelated keys in other shards
/// proceed in parallel. Readers take the shard read lock and always see a list
/// either before or after a given append.
#[derive(Debug, Default)]
pub struct Chain {
	states: DashMap<ContextKey, Vec<Token>>,
}

/// Summary of a single state: its key and the distinct tokens that follow it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateStatistic {
	pub key: ContextKey,
	/// Distinct next tokens with their occurrence counts,
	/// most frequent first (ties by token).
	pub next: Vec<(Token, usize)>,
}

impl StateStatistic {
	/// Total number of observed transitions out of this state.
	pub fn total(&self) -> usize {
		self.next.iter().map(|(_, count)| count).sum()
	}
}

impl Chain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct context keys currently stored.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Records `token` as a continuation of `key`.
	///
	/// - If the key is absent, it is inserted with `[token]`.
	/// - Otherwise `token` is appended to the existing outcome list.
	pub fn add_or_append(&self, key: ContextKey, token: Token) {
		self.states.entry(key).or_default().push(token);
	}

	pub fn contains(&self, key: &ContextKey) -> bool {
		self.states.contains_key(key)
	}

	/// Returns a snapshot of the outcome list for `key`.
	///
	/// # Errors
	/// Returns [`MarkovError::KeyNotFound`] if the key was never stored.
	pub fn get(&self, key: &ContextKey) -> Result<Vec<Token>> {
		self.states
			.get(key)
			.map(|outcomes| outcomes.value().clone())
			.ok_or_else(|| MarkovError::KeyNotFound(key.clone()))
	}

	/// Picks one continuation of `key` with the given strategy.
	///
	/// Selection happens under the shard read lock, so no copy of the
	/// outcome list is made.
	///
	/// # Errors
	/// Returns [`MarkovError::KeyNotFound`] if the key was never stored.
	pub(crate) fn select_with<R: Rng + ?Sized>(
		&self,
		key: &ContextKey,
		selector: UnigramSelector,
		rng: &mut R,
	) -> Result<Token> {
		let outcomes = self
			.states
			.get(key)
			.ok_or_else(|| MarkovError::KeyNotFound(key.clone()))?;
		// Outcome lists are never empty, a missing pick means a broken invariant
		selector
			.select_with(outcomes.value().as_slice(), rng)
			.map(str::to_owned)
			.ok_or_else(|| MarkovError::KeyNotFound(key.clone()))
	}

	/// Per-state transition statistics.
	///
	/// States are ordered by their total number of observed transitions,
	/// busiest first. Ties are broken by key so the output is stable.
	pub fn statistics(&self) -> Vec<StateStatistic> {
		let mut stats: Vec<StateStatistic> = self
			.states
			.iter()
			.map(|entry| {
				let mut counts: HashMap<&str, usize> = HashMap::new();
				for token in entry.value() {
					*counts.entry(token.as_str()).or_insert(0) += 1;
				}
				let mut next: Vec<(Token, usize)> = counts
					.into_iter()
					.map(|(token, count)| (token.to_owned(), count))
					.collect();
				next.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
				StateStatistic { key: entry.key().clone(), next }
			})
			.collect();

		stats.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.key.cmp(&b.key)));
		stats
	}
}
