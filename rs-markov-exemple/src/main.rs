use log::info;
use rs_markov_core::{GenerationInput, MarkovError, PersistentDictionary, TemporaryDictionary, delete};

const CORPUS: &str = "The dog ran across the yard. The dog barked at the mailman! \
    Why does the dog bark at the mailman? The mailman ran away. \
    The cat watched the dog from the fence.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log level is read from RUST_LOG (ex. RUST_LOG=debug)
    env_logger::init();

    // Depth must be between 1 and 9
    match TemporaryDictionary::new(12) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Depth 12 is invalid: {}", e),
    }

    // Open (or create) a dictionary stored in "./data/demo.markov.json"
    // Existing content is merged into the new dictionary
    let mut markov = PersistentDictionary::open("./data/demo", 2)?;
    info!("Using {}", markov.path().display());

    // Parsing is additive: running the demo twice doubles every count
    markov.parse(CORPUS, false)?;
    markov.save()?;

    // Generate with default parameters (fresh random seed)
    println!("Words: {}", markov.generate_words(12, None)?);
    println!("Sentences: {}", markov.generate_sentences(2, Some("The dog"))?);

    // A fixed RNG seed makes the output reproducible
    let mut input = GenerationInput::seeded(42);
    input.set_max_attempts(20)?;
    let mut generator = markov.generator(input);
    for i in 0..3 {
        println!("Sentence {}: {}", i + 1, generator.generate_sentences(1, None)?);
    }

    // A corpus without any end mark cannot produce sentences
    let mut poor = TemporaryDictionary::new(1)?;
    poor.parse("Round and Round and Round", false)?;
    match poor.generate_sentences(1, None) {
        Err(MarkovError::InsufficientCorpus { .. }) => println!("No sentence can be built from this corpus"),
        other => println!("Should not happen: {:?}", other),
    }

    // Delete the backing file; deleting twice reports NotFound
    delete(&markov)?;
    if let Err(MarkovError::NotFound(path)) = delete(&markov) {
        println!("Already deleted: {}", path.display());
    }

    Ok(())
}
