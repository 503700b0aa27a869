use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

/// Strategy used to pick the next token from an outcome list.
///
/// # Variants
/// - `Weighted`: draws uniformly from the list as stored. Duplicates are kept,
///   so a token's probability is proportional to how often it was observed.
/// - `Unweighted`: reduces the list to its distinct tokens first, then draws
///   uniformly. Every distinct continuation is equally likely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnigramSelector {
	Weighted,
	Unweighted,
}

impl UnigramSelector {
	/// Picks one token using the thread-local random generator.
	///
	/// Returns `None` if `outcomes` is empty.
	pub fn select<'a, S: AsRef<str>>(&self, outcomes: &'a [S]) -> Option<&'a str> {
		self.select_with(outcomes, &mut rand::rng())
	}

	/// Picks one token using the provided random generator.
	///
	/// Returns `None` if `outcomes` is empty.
	pub fn select_with<'a, S, R>(&self, outcomes: &'a [S], rng: &mut R) -> Option<&'a str>
	where
		S: AsRef<str>,
		R: Rng + ?Sized,
	{
		match self {
			Self::Weighted => outcomes.choose(rng).map(AsRef::as_ref),
			Self::Unweighted => {
				// Keep first-seen order so a seeded rng gives stable picks
				let mut seen = HashSet::new();
				let distinct: Vec<&str> = outcomes
					.iter()
					.map(AsRef::as_ref)
					.filter(|token| seen.insert(*token))
					.collect();
				distinct.choose(rng).copied()
			}
		}
	}
}
