#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

const ALPHABET: &[char] = &['a', 'b', 'c', ' ', 'é', '€', '𝄞', '\n'];

/// An edit valid against the text it was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(usize, String),
    Delete(usize, String),
}

impl Edit {
    /// Apply to a plain string, indices in chars.
    pub fn apply_to(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        match self {
            Edit::Insert(index, inserted) => {
                let mut out: String = chars[..*index].iter().collect();
                out.push_str(inserted);
                out.extend(&chars[*index..]);
                out
            }
            Edit::Delete(index, removed) => {
                let end = index + removed.chars().count();
                let mut out: String = chars[..*index].iter().collect();
                out.extend(&chars[end..]);
                out
            }
        }
    }
}

/// Seeded random edit source, xoshiro256** underneath.
pub struct EditFuzzer {
    rng: Xoshiro256StarStar,
}

impl EditFuzzer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    pub fn random_int(&mut self, min: usize, max: usize) -> usize {
        self.rng.gen_range(min..=max)
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    pub fn random_text(&mut self, max_len: usize) -> String {
        let len = self.random_int(1, max_len);
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())])
            .collect()
    }

    pub fn insert(&mut self, text: &str) -> Edit {
        let len = text.chars().count();
        let index = self.random_int(0, len);
        Edit::Insert(index, self.random_text(4))
    }

    /// A random edit; deletes only when there is text to delete.
    pub fn edit(&mut self, text: &str) -> Edit {
        let len = text.chars().count();
        if len == 0 || self.chance(0.6) {
            return self.insert(text);
        }
        let index = self.random_int(0, len - 1);
        let count = self.random_int(1, (len - index).min(4));
        Edit::Delete(index, text.chars().skip(index).take(count).collect())
    }
}
