use std::collections::HashSet;

use super::generator::MarkovGenerator;

/// Lazy sequence of generated lines, returned by [`MarkovGenerator::walk`].
///
/// Each call to `next` invokes the walker until a line is accepted or the
/// attempt budget (`line_count * attempts_per_line`) runs out.
///
/// # Uniqueness
/// With `ensure_unique` enabled, a line is discarded (and does not count
/// toward `line_count`) when it equals a learned phrase or a line already
/// produced by this walk. Otherwise every line is accepted.
///
/// # Notes
/// - Every walk owns its budget and its set of produced lines, so several
///   walks can run in parallel on one generator.
/// - A walk cannot be resumed once exhausted; call `walk` again instead.
#[derive(Debug)]
pub struct Walk<'a> {
	generator: &'a MarkovGenerator,
	seed: String,
	requested: usize,
	budget: usize,
	attempts: usize,
	produced: Vec<String>,
	seen: HashSet<String>,
	exhausted: bool,
}

/// Outcome of a fully drained [`Walk`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkReport {
	pub lines: Vec<String>,
	pub requested: usize,
	pub produced: usize,
	pub attempts: usize,
}

impl WalkReport {
	/// True when fewer lines were produced than requested.
	pub fn is_short(&self) -> bool {
		self.produced < self.requested
	}
}

impl<'a> Walk<'a> {
	pub(crate) fn new(generator: &'a MarkovGenerator, requested: usize, seed: &str) -> Self {
		Self {
			generator,
			seed: seed.to_owned(),
			requested,
			budget: requested.saturating_mul(generator.config().attempts_per_line()),
			attempts: 0,
			produced: Vec::new(),
			seen: HashSet::new(),
			exhausted: false,
		}
	}

	/// Number of lines asked for.
	pub fn requested(&self) -> usize {
		self.requested
	}

	/// Number of lines accepted so far.
	pub fn produced(&self) -> usize {
		self.produced.len()
	}

	/// Number of walker invocations so far.
	pub fn attempts(&self) -> usize {
		self.attempts
	}

	/// True once the attempt budget ran out before `requested` lines
	/// were accepted.
	pub fn is_short(&self) -> bool {
		self.exhausted && self.produced() < self.requested
	}

	/// Drains the walk and returns every accepted line with its counters.
	pub fn finish(mut self) -> WalkReport {
		while self.next().is_some() {}
		WalkReport {
			requested: self.requested,
			produced: self.produced.len(),
			attempts: self.attempts,
			lines: self.produced,
		}
	}

	fn is_novel(&self, line: &str) -> bool {
		!self.generator.config().ensure_unique
			|| !(self.generator.is_source_phrase(line) || self.seen.contains(line))
	}
}

impl Iterator for Walk<'_> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		if self.exhausted || self.produced.len() >= self.requested {
			return None;
		}

		while self.attempts < self.budget {
			let line = self.generator.walk_line(&self.seed);
			self.attempts += 1;

			if self.is_novel(&line) {
				self.seen.insert(line.clone());
				self.produced.push(line.clone());
				return Some(line);
			}
		}

		self.exhausted = true;
		log::warn!(
			"breaking out of walk early - {} generations did not produce {} distinct lines ({} were created)",
			self.attempts,
			self.requested,
			self.produced.len()
		);
		None
	}
}
