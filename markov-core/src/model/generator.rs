use std::thread;

use dashmap::DashSet;
use rand::Rng;

use crate::error::{MarkovError, Result};
use super::chain::{Chain, StateStatistic};
use super::config::GeneratorConfig;
use super::selector::UnigramSelector;
use super::tokenizer::{self, ContextKey, Token};
use super::walk::Walk;

/// Order-N Markov text generator over space-delimited tokens.
///
/// # Responsibilities
/// - Learn phrases into a shared [`Chain`]
/// - Remember every distinct phrase it learned (the source phrases)
/// - Generate single lines ([`MarkovGenerator::walk_line`]) and bounded,
///   optionally deduplicated batches of lines ([`MarkovGenerator::walk`])
///
/// All methods take `&self`: the generator can be shared across threads
/// (for example behind an `Arc`) and trained and walked concurrently.
#[derive(Debug)]
pub struct MarkovGenerator {
	config: GeneratorConfig,
	chain: Chain,
	source_phrases: DashSet<String>,
}

impl MarkovGenerator {
	/// Creates an empty generator with the given order and default settings.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidArgument`] if `order` is 0.
	pub fn new(order: usize) -> Result<Self> {
		Self::with_config(GeneratorConfig::with_order(order)?)
	}

	/// Creates an empty generator from a full config.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidArgument`] if the config is invalid.
	pub fn with_config(config: GeneratorConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			config,
			chain: Chain::new(),
			source_phrases: DashSet::new(),
		})
	}

	pub fn order(&self) -> usize {
		self.config.order()
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Enables or disables filtering of non-novel lines in [`MarkovGenerator::walk`].
	pub fn set_ensure_unique(&mut self, ensure_unique: bool) {
		self.config.ensure_unique = ensure_unique;
	}

	/// Read-only access to the underlying chain.
	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	/// Number of distinct context keys in the chain.
	pub fn chain_size(&self) -> usize {
		self.chain.len()
	}

	/// Returns true if the chain holds continuations for `context`.
	///
	/// `context` is compared token by token; it only matches when it has
	/// exactly `order` tokens.
	pub fn contains<S: AsRef<str>>(&self, context: &[S]) -> bool {
		self.chain.contains(&ContextKey::new(context))
	}

	/// Number of distinct phrases learned so far.
	pub fn source_phrase_count(&self) -> usize {
		self.source_phrases.len()
	}

	pub fn is_source_phrase(&self, phrase: &str) -> bool {
		self.source_phrases.contains(phrase)
	}

	/// Per-state transition statistics, busiest states first.
	pub fn statistics(&self) -> Vec<StateStatistic> {
		self.chain.statistics()
	}

	/// Learns a single phrase.
	///
	/// # Behavior
	/// - Empty phrases and phrases with fewer than `order` tokens are ignored.
	/// - The phrase is recorded as a source phrase **without** checking whether
	///   it was learned before, so learning the same phrase twice doubles its
	///   transition frequencies. Use [`MarkovGenerator::learn_many`] to skip
	///   phrases already learned.
	/// - Every token position `i` adds one `(key_for(i), token[i])` association,
	///   including the left-padded keys of the first `order` positions.
	pub fn learn(&self, phrase: &str) {
		self.learn_phrase(phrase);
	}

	fn learn_phrase(&self, phrase: &str) {
		if let Some(tokens) = self.tokenize_learnable(phrase) {
			self.source_phrases.insert(phrase.to_owned());
			self.learn_tokens(&tokens);
		}
	}

	/// Splits `phrase`, or returns `None` if it is empty or shorter than `order`.
	fn tokenize_learnable(&self, phrase: &str) -> Option<Vec<Token>> {
		if phrase.is_empty() {
			return None;
		}

		let tokens = tokenizer::split(phrase);
		if tokens.len() < self.order() {
			log::debug!("skipping phrase shorter than order {}: {:?}", self.order(), phrase);
			return None;
		}
		Some(tokens)
	}

	/// Learns a batch of phrases, skipping those already learned.
	///
	/// A phrase repeated inside the batch, or learned by another batch running
	/// concurrently, is learned only once: inserting it into the source set is
	/// what claims it.
	pub fn learn_many<I, S>(&self, phrases: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let before = self.chain_size();
		let learned = self.learn_new(phrases);
		log::info!(
			"learned {} new phrases, chain grew from {} to {} states",
			learned,
			before,
			self.chain_size()
		);
	}

	/// Learns a batch of phrases on several threads.
	///
	/// Same filtering as [`MarkovGenerator::learn_many`]: copies of one phrase
	/// landing in different chunks are learned once.
	///
	/// # Behavior
	/// - Splits the batch into chunks (based on CPU cores * factor).
	/// - Learns each chunk on a scoped thread against the shared chain.
	pub fn learn_parallel<S: AsRef<str> + Sync>(&self, phrases: &[S]) {
		if phrases.is_empty() {
			return;
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = phrases.len().div_ceil(chunks);

		let before = self.chain_size();
		let learned: usize = thread::scope(|scope| {
			let handles: Vec<_> = phrases
				.chunks(chunk_size)
				.map(|chunk| scope.spawn(move || self.learn_new(chunk)))
				.collect();
			Self::sum_learned(handles.into_iter().map(|handle| handle.join()))
		});
		log::info!(
			"learned {} new phrases on {} threads, chain grew from {} to {} states",
			learned,
			phrases.len().div_ceil(chunk_size),
			before,
			self.chain_size()
		);
	}

	/// Adds up per-chunk learned counts, warning about chunks whose thread panicked.
	fn sum_learned<I>(results: I) -> usize
	where
		I: IntoIterator<Item = thread::Result<usize>>,
	{
		results
			.into_iter()
			.enumerate()
			.filter_map(|(index, result)| match result {
				Ok(learned) => Some(learned),
				Err(_) => {
					log::warn!("learner thread for chunk {} panicked, its remaining phrases were not learned", index);
					None
				}
			})
			.sum()
	}

	/// Learns every phrase not yet in the source set, returns how many were
	/// accepted.
	fn learn_new<I, S>(&self, phrases: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut learned = 0;
		for phrase in phrases {
			let phrase = phrase.as_ref();
			if self.source_phrases.contains(phrase) {
				continue;
			}
			let Some(tokens) = self.tokenize_learnable(phrase) else {
				continue;
			};
			// Only the caller whose insert succeeds learns the tokens
			if self.source_phrases.insert(phrase.to_owned()) {
				self.learn_tokens(&tokens);
				learned += 1;
			}
		}
		learned
	}

	fn learn_tokens(&self, tokens: &[Token]) {
		for (i, token) in tokens.iter().enumerate() {
			let key = ContextKey::for_position(tokens, i, self.order());
			self.chain.add_or_append(key, token.clone());
		}
	}

	/// Generates up to `line_count` lines, lazily.
	///
	/// See [`Walk`] for the uniqueness rule and the attempt budget.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidArgument`] if `line_count` is 0.
	pub fn walk(&self, line_count: usize, seed: &str) -> Result<Walk<'_>> {
		if line_count < 1 {
			return Err(MarkovError::InvalidArgument(
				"line count for walk must be a positive integer".to_owned(),
			));
		}
		Ok(Walk::new(self, line_count, seed))
	}

	/// Generates a single line from `seed` using the thread-local rng.
	pub fn walk_line(&self, seed: &str) -> String {
		self.walk_line_with(seed, &mut rand::rng())
	}

	/// Generates a single line from `seed`.
	///
	/// # Behavior
	/// - The window starts as the trailing `order` tokens of the seed,
	///   left-padded with the empty sentinel.
	/// - A non-empty seed is emitted verbatim as the line's prefix.
	/// - The first generated token is picked unweighted, every later one
	///   weighted. Seed tokens are not generated tokens, so a seeded line
	///   also opens with an unweighted pick.
	/// - Stops when the window has no continuation or after `max_tokens`
	///   generated tokens (seed tokens do not count).
	pub fn walk_line_with<R: Rng + ?Sized>(&self, seed: &str, rng: &mut R) -> String {
		let seed_tokens: Vec<Token> = if seed.is_empty() { Vec::new() } else { tokenizer::split(seed) };
		let mut window = ContextKey::from_seed(&seed_tokens, self.order());
		let mut built = seed_tokens;
		let mut generated = 0;

		while generated < self.config.max_tokens() {
			if !self.chain.contains(&window) {
				break;
			}

			let selector = if generated == 0 {
				UnigramSelector::Unweighted
			} else {
				UnigramSelector::Weighted
			};
			let chosen = match self.chain.select_with(&window, selector, rng) {
				Ok(token) => token,
				Err(_) => break,
			};

			window.shift(chosen.clone());
			built.push(chosen);
			generated += 1;
		}

		if generated == self.config.max_tokens() {
			log::debug!("line stopped at the {} token cap", generated);
		}

		tokenizer::rebuild(&built)
	}
}
