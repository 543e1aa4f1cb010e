use lazy_static::lazy_static;
use rand::Rng;
use std::collections::HashSet;

pub const CORPUS_SIZE: usize = 10_000;

struct StringCorpus {
    unsorted: Vec<String>,
    sorted: Vec<String>,
}

impl StringCorpus {
    fn generate() -> Self {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 2, 3, 4]);
        let mut seen = HashSet::with_capacity(CORPUS_SIZE);
        let mut unsorted = Vec::with_capacity(CORPUS_SIZE);

        while unsorted.len() < CORPUS_SIZE {
            let len = rng.gen_range(4, 24);
            let line: String = rng.gen_ascii_chars().take(len).collect();
            if seen.insert(line.clone()) {
                unsorted.push(line);
            }
        }

        let mut sorted = unsorted.clone();
        sorted.sort();
        StringCorpus { unsorted, sorted }
    }
}

lazy_static! {
    static ref CORPUS: StringCorpus = StringCorpus::generate();
}

/// Returns a copy of the corpus in generation order that callers are free to modify.
pub fn unsorted_strings() -> Vec<String> {
    CORPUS.unsorted.clone()
}

/// Returns the corpus sorted in ascending order.
pub fn sorted_strings() -> &'static [String] {
    &CORPUS.sorted
}

pub fn height_bound(len: usize) -> f64 {
    1.44 * (len as f64).log2()
}
