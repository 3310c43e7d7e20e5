//! Session code generation.
//!
//! Codes are human-readable `adjective-color-animal` triples, meant to be
//! read aloud or typed by the joining player. They are effectively unique;
//! nothing in the registry enforces uniqueness.

mod words;

use rand::Rng;

use words::{ADJECTIVES, ANIMALS, COLORS};

/// Source of fresh session codes. Injected into the registry so tests can
/// substitute a deterministic sequence.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Draws one word from each embedded dictionary, joined with `-`.
pub struct WordListGenerator;

impl CodeGenerator for WordListGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        format!(
            "{}-{}-{}",
            ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())],
            COLORS[rng.gen_range(0..COLORS.len())],
            ANIMALS[rng.gen_range(0..ANIMALS.len())],
        )
    }
}
