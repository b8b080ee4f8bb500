//! Benchmark corpus builders for the widepool allocator.
//!
//! Provides deterministic, shuffled wide-string corpora for comparing
//! pool allocation against individually owned strings. Line lengths
//! are chosen to defeat small-string optimizations in the comparison
//! baseline, and every line gets a unique counter suffix so sorting
//! has real work to do.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Source lines for corpus generation.
pub const LOREM_LINES: [&str; 8] = [
    "Lorem ipsum dolor sit amet, consectetuer adipiscing elit.",
    "Maecenas porttitor congue massa. Fusce posuere, magna sed",
    "pulvinar ultricies, purus lectus malesuada libero,",
    "sit amet commodo magna eros quis urna.",
    "Nunc viverra imperdiet enim. Fusce est. Vivamus a tellus.",
    "Pellentesque habitant morbi tristique senectus et netus et",
    "malesuada fames ac turpis egestas. Proin pharetra nonummy pede.",
    "Mauris et orci. Aenean nec lorem in porttitor.",
];

/// Build `repeat * LOREM_LINES.len()` UTF-16 strings, each line
/// suffixed with its repetition counter.
pub fn corpus(repeat: usize) -> Vec<Vec<u16>> {
    let mut out = Vec::with_capacity(repeat * LOREM_LINES.len());
    for i in 0..repeat {
        for line in LOREM_LINES {
            let s = format!("{line} (#{i})");
            out.push(s.encode_utf16().collect());
        }
    }
    out
}

/// Build a corpus and shuffle it with a seeded ChaCha8 RNG.
///
/// Identical seeds produce identical orderings, so benchmark runs are
/// comparable across machines and invocations.
pub fn shuffled_corpus(repeat: usize, seed: u64) -> Vec<Vec<u16>> {
    let mut out = corpus(repeat);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    out.shuffle(&mut rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use widepool::StringPool;

    #[test]
    fn corpus_lines_are_unique() {
        let c = corpus(3);
        assert_eq!(c.len(), 24);
        let mut sorted = c.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 24);
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        assert_eq!(shuffled_corpus(10, 1729), shuffled_corpus(10, 1729));
        assert_ne!(shuffled_corpus(10, 1729), shuffled_corpus(10, 42));
    }

    #[test]
    fn pool_contents_match_owned_corpus() {
        let sources = shuffled_corpus(25, 1729);
        let pool = StringPool::new();
        let handles: Vec<_> = sources
            .iter()
            .map(|s| pool.alloc_units(s).unwrap())
            .collect();

        assert_eq!(handles.len(), sources.len());
        for (handle, source) in handles.iter().zip(&sources) {
            assert_eq!(&handle.to_vec(), source);
        }
    }

    #[test]
    fn sorting_handles_agrees_with_sorting_owned_strings() {
        let sources = shuffled_corpus(25, 1729);
        let pool = StringPool::new();
        let mut handles: Vec<_> = sources
            .iter()
            .map(|s| pool.alloc_units(s).unwrap())
            .collect();

        let mut owned = sources;
        owned.sort_unstable();
        handles.sort_unstable();

        for (handle, source) in handles.iter().zip(&owned) {
            assert_eq!(&handle.to_vec(), source);
        }
    }
}
