use rs_markov_core::{GenerationInput, MarkovError, PersistentDictionary, TemporaryDictionary};
use tempfile::TempDir;

const CORPUS: &str = "The quick fox jumps over the lazy dog. The lazy dog sleeps all day! \
	Does the quick fox ever rest? The fox never rests.";

fn trained(depth: usize) -> TemporaryDictionary {
	let mut markov = TemporaryDictionary::new(depth).expect("new");
	markov.parse(CORPUS, false).expect("parse");
	markov
}

#[test]
fn words_only_use_known_transitions() {
	let markov = trained(1);
	let words = markov.generator(GenerationInput::seeded(17)).generate_words(200, Some("The")).expect("words");
	let tokens: Vec<&str> = words.split(' ').collect();
	assert_eq!(tokens.len(), 200);

	let dictionary = markov.dictionary();
	for pair in tokens.windows(2) {
		let followers = dictionary.followers(pair[0]).expect("every emitted token is a context at depth 1");
		// Either a real transition or a restart after a terminal context
		assert!(followers.count(pair[1]) > 0 || followers.is_terminal(), "{} -> {}", pair[0], pair[1]);
	}
}

#[test]
fn sentences_are_well_formed_at_every_depth() {
	for depth in 1..=3 {
		let markov = trained(depth);
		let mut generator = markov.generator(GenerationInput::seeded(depth as u64));

		for _ in 0..10 {
			let sentence = generator.generate_sentences(1, None).expect("sentence");
			assert!(sentence.chars().next().unwrap().is_uppercase(), "{sentence:?}");
			assert!(sentence.ends_with(['.', '!', '?']), "{sentence:?}");
		}
	}
}

#[test]
fn seeded_generation_is_reproducible_after_reload() {
	let temp = TempDir::new().expect("tempdir");
	let base = temp.path().join("fox");

	let mut stored = PersistentDictionary::open(&base, 2).expect("open");
	stored.parse(CORPUS, false).expect("parse");
	stored.save().expect("save");
	let reloaded = PersistentDictionary::open(&base, 2).expect("reopen");

	let input = GenerationInput::seeded(99);
	let before = stored.generator(input.clone()).generate_sentences(3, None).expect("before");
	let after = reloaded.generator(input).generate_sentences(3, None).expect("after");
	assert_eq!(before, after);
}

#[test]
fn generation_does_not_change_the_dictionary() {
	let markov = trained(2);
	let snapshot = markov.dictionary().clone();

	markov.generate_words(100, None).expect("words");
	markov.generate_sentences(5, None).expect("sentences");

	assert_eq!(markov.dictionary(), &snapshot);
}

#[test]
fn concurrent_generators_share_a_snapshot() {
	let markov = trained(1);

	std::thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|i| {
				let markov = &markov;
				scope.spawn(move || markov.generator(GenerationInput::seeded(i)).generate_words(50, None))
			})
			.collect();

		for handle in handles {
			let words = handle.join().expect("thread").expect("words");
			assert_eq!(words.split(' ').count(), 50);
		}
	});
}

#[test]
fn punctuation_free_corpus_cannot_make_sentences() {
	let mut markov = TemporaryDictionary::new(1).expect("new");
	markov.parse("Alpha beta Gamma delta Alpha", false).expect("parse");

	let mut input = GenerationInput::seeded(3);
	input.set_max_attempts(10).expect("attempts");
	input.set_max_sentence_tokens(25).expect("tokens");

	let err = markov.generator(input).generate_sentences(1, None).unwrap_err();
	assert!(matches!(err, MarkovError::InsufficientCorpus { requested: 1, completed: 0 }));
}
