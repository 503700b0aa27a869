use markov_core::model::config::{GeneratorConfig, MAX_GENERATED_TOKENS};
use markov_core::model::selector::UnigramSelector;
use markov_core::model::tokenizer::{self, ContextKey};
use markov_core::{MarkovError, MarkovGenerator};

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn unique_generator(order: usize) -> MarkovGenerator {
	let mut config = GeneratorConfig::with_order(order).unwrap();
	config.ensure_unique = true;
	MarkovGenerator::with_config(config).unwrap()
}

fn share(outcomes: &[String], selector: UnigramSelector, token: &str) -> f64 {
	let mut rng = StdRng::seed_from_u64(1234);
	let draws = 30_000;
	let hits = (0..draws)
		.filter(|_| selector.select_with(outcomes, &mut rng) == Some(token))
		.count();
	hits as f64 / draws as f64
}

#[test]
fn weighted_and_unweighted_selection_diverge() {
	let generator = MarkovGenerator::new(2).unwrap();
	generator.learn("the cat sat on the rug");
	generator.learn("the dog sat on the rug");
	generator.learn("the cat sat on the rug");

	let outcomes = generator.chain().get(&ContextKey::new(&["", "the"])).unwrap();
	assert_eq!(outcomes, vec!["cat", "dog", "cat"]);

	let weighted = share(&outcomes, UnigramSelector::Weighted, "cat");
	let unweighted = share(&outcomes, UnigramSelector::Unweighted, "cat");
	assert!((weighted - 2.0 / 3.0).abs() < 0.03, "weighted cat share was {weighted}");
	assert!((unweighted - 0.5).abs() < 0.03, "unweighted cat share was {unweighted}");
}

#[test]
fn batch_learning_does_not_inflate_repeated_phrases() {
	let generator = MarkovGenerator::new(2).unwrap();
	generator.learn_many([
		"the cat sat on the rug",
		"the dog sat on the rug",
		"the cat sat on the rug",
	]);

	let outcomes = generator.chain().get(&ContextKey::new(&["", "the"])).unwrap();
	assert_eq!(outcomes, vec!["cat", "dog"]);
	assert_eq!(generator.source_phrase_count(), 2);
}

#[test]
fn padding_key_appears_after_first_phrase() {
	let generator = MarkovGenerator::new(2).unwrap();
	assert!(!generator.contains(&["", ""]));

	generator.learn("hello there world");
	assert!(generator.contains(&["", ""]));
	let outcomes = generator.chain().get(&ContextKey::new(&["", ""])).unwrap();
	assert!(outcomes.contains(&"hello".to_owned()));
}

#[test]
fn untrained_seed_returns_only_itself() {
	let generator = MarkovGenerator::new(2).unwrap();
	assert_eq!(generator.walk_line(""), "");

	generator.learn("the cat sat on the rug");
	assert_eq!(generator.walk_line("purple elephants dance"), "purple elephants dance");
}

#[test]
fn exhausted_budget_returns_partial_result() {
	// Four reachable lines, two of which are learned phrases
	let generator = unique_generator(1);
	generator.learn("a x b");
	generator.learn("c x d");

	let report = generator.walk(3, "").unwrap().finish();
	assert_eq!(report.requested, 3);
	assert_eq!(report.attempts, 30);
	assert!(report.produced <= 2);
	assert!(report.is_short());
	for line in &report.lines {
		assert!(line == "a x d" || line == "c x b", "unexpected line {line:?}");
	}
}

#[test]
fn walk_lines_are_distinct_with_uniqueness() {
	let generator = unique_generator(1);
	generator.learn("a x b");
	generator.learn("c x d");

	let lines: Vec<String> = generator.walk(2, "").unwrap().collect();
	assert!(lines.len() <= 2);
	if lines.len() == 2 {
		assert_ne!(lines[0], lines[1]);
	}
}

#[test]
fn walk_with_zero_lines_is_invalid() {
	let generator = MarkovGenerator::new(2).unwrap();
	assert!(matches!(generator.walk(0, ""), Err(MarkovError::InvalidArgument(_))));
}

#[test]
fn generated_tokens_never_exceed_cap() {
	let generator = MarkovGenerator::new(1).unwrap();
	generator.learn("loop loop");

	let line = generator.walk_line("");
	assert_eq!(tokenizer::split(&line).len(), MAX_GENERATED_TOKENS);

	// Seed tokens come on top of the generated ones
	let seeded = generator.walk_line("start loop");
	assert_eq!(tokenizer::split(&seeded).len(), MAX_GENERATED_TOKENS + 2);
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn short_phrases_leave_the_model_untouched(order in 2usize..6, words in prop::collection::vec("[a-z]{1,5}", 1..6)) {
		prop_assume!(words.len() < order);
		let generator = MarkovGenerator::new(order).unwrap();
		generator.learn(&words.join(" "));

		prop_assert_eq!(generator.chain_size(), 0);
		prop_assert_eq!(generator.source_phrase_count(), 0);
	}

	#[test]
	fn learning_adds_one_association_per_token(order in 1usize..5, words in prop::collection::vec("[a-z]{1,5}", 5..15)) {
		let generator = MarkovGenerator::new(order).unwrap();
		generator.learn(&words.join(" "));

		let associations: usize = generator.statistics().iter().map(|state| state.total()).sum();
		prop_assert_eq!(associations, words.len());
	}

	#[test]
	fn outcomes_accumulate_across_phrases(order in 1usize..4, phrases in prop::collection::vec(prop::collection::vec("[ab]", 4..8), 1..6)) {
		let generator = MarkovGenerator::new(order).unwrap();
		let mut expected = 0;
		for words in &phrases {
			generator.learn(&words.join(" "));
			expected += words.len();
		}

		let stats = generator.statistics();
		prop_assert!(stats.iter().all(|state| state.total() > 0));
		prop_assert_eq!(stats.iter().map(|state| state.total()).sum::<usize>(), expected);
	}
}
