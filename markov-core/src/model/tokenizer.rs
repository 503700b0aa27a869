use std::fmt;

/// A single whitespace-delimited unit of text.
///
/// The empty string doubles as the padding sentinel (see [`PAD`]).
pub type Token = String;

/// Padding sentinel used where no real token is available (sequence start).
pub const PAD: &str = "";

/// Splits a phrase into tokens on single spaces.
///
/// Runs of spaces are not collapsed and the phrase is not trimmed, so
/// `"a  b"` yields `["a", "", "b"]`.
pub fn split(phrase: &str) -> Vec<Token> {
	phrase.split(' ').map(str::to_owned).collect()
}

/// Joins tokens back into a phrase with single spaces.
///
/// `rebuild(&split(p)) == p` for any phrase.
pub fn rebuild<S: AsRef<str>>(tokens: &[S]) -> String {
	tokens
		.iter()
		.map(AsRef::as_ref)
		.collect::<Vec<_>>()
		.join(" ")
}

/// History window used to look up continuations in the chain.
///
/// Holds exactly `order` tokens, oldest first. Equality and hashing are
/// element-wise over the tokens, so two keys built independently from the
/// same history resolve to the same chain entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey(Vec<Token>);

impl ContextKey {
	/// Builds a key from an explicit window of tokens.
	pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
		Self(tokens.iter().map(|t| t.as_ref().to_owned()).collect())
	}

	/// Derives the key for the token at position `i`.
	///
	/// For each offset `j` from `order` down to 1, the component at position
	/// `order - j` is `tokens[i - j]` when that index exists, otherwise the
	/// padding sentinel. The first `order` positions of a phrase therefore get
	/// left-padded history.
	pub fn for_position<S: AsRef<str>>(tokens: &[S], i: usize, order: usize) -> Self {
		let key = (1..=order)
			.rev()
			.map(|j| match i.checked_sub(j) {
				Some(index) => tokens[index].as_ref().to_owned(),
				None => PAD.to_owned(),
			})
			.collect();
		Self(key)
	}

	/// Builds the initial window for a seed phrase.
	///
	/// Keeps the trailing `order` tokens when the seed is longer, left-pads
	/// with the sentinel when it is shorter.
	pub fn from_seed<S: AsRef<str>>(seed: &[S], order: usize) -> Self {
		let tail = &seed[seed.len().saturating_sub(order)..];
		let key = std::iter::repeat_n(PAD.to_owned(), order - tail.len())
			.chain(tail.iter().map(|t| t.as_ref().to_owned()))
			.collect();
		Self(key)
	}

	/// Number of tokens in the window.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn tokens(&self) -> &[Token] {
		&self.0
	}

	/// Drops the oldest token and appends `next`, keeping the length fixed.
	pub fn shift(&mut self, next: Token) {
		if !self.0.is_empty() {
			self.0.remove(0);
		}
		self.0.push(next);
	}
}

impl fmt::Display for ContextKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn split_keeps_empty_tokens() {
		assert_eq!(split("a  b"), vec!["a", "", "b"]);
		assert_eq!(split(" a"), vec!["", "a"]);
		assert_eq!(split(""), vec![""]);
	}

	#[test]
	fn key_is_left_padded_at_phrase_start() {
		let tokens = split("the cat sat");
		assert_eq!(ContextKey::for_position(&tokens, 0, 2), ContextKey::new(&["", ""]));
		assert_eq!(ContextKey::for_position(&tokens, 1, 2), ContextKey::new(&["", "the"]));
		assert_eq!(ContextKey::for_position(&tokens, 2, 2), ContextKey::new(&["the", "cat"]));
	}

	#[test]
	fn seed_window_keeps_tail_or_pads() {
		let long = split("a b c d");
		assert_eq!(ContextKey::from_seed(&long, 2), ContextKey::new(&["c", "d"]));

		let short = split("a");
		assert_eq!(ContextKey::from_seed(&short, 3), ContextKey::new(&["", "", "a"]));

		let none: Vec<Token> = Vec::new();
		assert_eq!(ContextKey::from_seed(&none, 2), ContextKey::new(&["", ""]));
	}

	#[test]
	fn shift_slides_the_window() {
		let mut key = ContextKey::new(&["", "the"]);
		key.shift("cat".to_owned());
		assert_eq!(key, ContextKey::new(&["the", "cat"]));
		assert_eq!(key.len(), 2);
	}

	proptest! {
		#[test]
		fn rebuild_inverts_split(words in prop::collection::vec("[a-z]{1,8}", 1..12)) {
			let phrase = words.join(" ");
			prop_assert_eq!(rebuild(&split(&phrase)), phrase);
		}

		#[test]
		fn keys_always_have_order_components(len in 1usize..20, order in 1usize..6, i in 0usize..20) {
			let tokens: Vec<Token> = (0..len).map(|n| n.to_string()).collect();
			let i = i % len;
			prop_assert_eq!(ContextKey::for_position(&tokens, i, order).len(), order);
		}
	}
}
