//! Random sequence pairs with a given error rate.

use crate::prelude::*;
use itertools::Itertools;
use rand::Rng;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum ErrorModel {
    /// Substitutions, insertions and deletions at random positions.
    #[default]
    Uniform,
    /// Make a single gap (insertion or deletion) of size e*n.
    Gap,
}

#[cfg(feature = "cli")]
#[derive(Parser, Clone, Debug, Default, Serialize, Deserialize)]
#[clap(next_help_heading = "Generate")]
pub struct GenerateArgs {
    /// The number of sequence pairs to generate
    #[clap(short = 'x', long, default_value_t = 1)]
    pub cnt: usize,

    /// Length of generated sequences
    #[clap(short = 'n', long, requires = "error_rate")]
    pub length: Option<usize>,

    /// Error rate between the generated sequences
    #[clap(short, long, requires = "length")]
    pub error_rate: Option<f32>,

    #[clap(long, value_enum, default_value_t, value_name = "MODEL")]
    pub error_model: ErrorModel,

    /// Seed to initialize RNG for reproducibility
    #[clap(long)]
    pub seed: Option<u64>,
}

#[cfg(feature = "cli")]
impl GenerateArgs {
    /// `None` unless both a length and an error rate were given.
    pub fn to_generate_options(&self) -> Option<GenerateOptions> {
        Some(GenerateOptions {
            length: self.length?,
            error_rate: self.error_rate?,
            error_model: self.error_model,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GenerateOptions {
    pub length: usize,
    pub error_rate: f32,
    pub error_model: ErrorModel,
}

const ALPH: [u8; 4] = *b"ACGT";

enum Mutation {
    // Replace char at pos.
    Substitution(usize, u8),
    // Insert char before pos.
    Insertion(usize, u8),
    // Delete char at pos.
    Deletion(usize),
}

fn rand_char(rng: &mut impl Rng) -> u8 {
    ALPH[rng.gen_range(0..ALPH.len())]
}

pub fn random_sequence(n: usize, rng: &mut impl Rng) -> Sequence {
    (0..n).map(|_| rand_char(rng)).collect_vec()
}

fn random_mutation(len_b: usize, rng: &mut impl Rng) -> Mutation {
    // For length 0 sequences, only generate insertions.
    match if len_b == 0 { 1 } else { rng.gen_range(0..3) } {
        0 => Mutation::Substitution(rng.gen_range(0..len_b), rand_char(rng)),
        1 => Mutation::Insertion(rng.gen_range(0..=len_b), rand_char(rng)),
        _ => Mutation::Deletion(rng.gen_range(0..len_b)),
    }
}

/// A random sequence `a` of the given length, and a copy `b` with
/// `ceil(e * n)` random edits applied.
pub fn generate_pair(opt: &GenerateOptions, rng: &mut impl Rng) -> (Sequence, Sequence) {
    let a = random_sequence(opt.length, rng);
    let num_mutations = (opt.error_rate * opt.length as f32).ceil() as usize;
    let mut b = a.clone();
    match opt.error_model {
        ErrorModel::Uniform => {
            for _ in 0..num_mutations {
                match random_mutation(b.len(), rng) {
                    Mutation::Substitution(i, c) => b[i] = c,
                    Mutation::Insertion(i, c) => b.insert(i, c),
                    Mutation::Deletion(i) => {
                        b.remove(i);
                    }
                }
            }
        }
        ErrorModel::Gap => {
            let num_mutations = min(num_mutations, b.len());
            if rng.gen_bool(0.5) {
                let start = rng.gen_range(0..=b.len() - num_mutations);
                b.drain(start..start + num_mutations);
            } else {
                let start = rng.gen_range(0..=b.len());
                let text = random_sequence(num_mutations, rng);
                b.splice(start..start, text);
            }
        }
    }
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn seeded_generation_is_reproducible() {
        let opt = GenerateOptions {
            length: 100,
            error_rate: 0.1,
            error_model: ErrorModel::Uniform,
        };
        let x = generate_pair(&opt, &mut ChaCha8Rng::seed_from_u64(31415));
        let y = generate_pair(&opt, &mut ChaCha8Rng::seed_from_u64(31415));
        assert_eq!(x, y);
        assert_eq!(x.0.len(), 100);
        assert!(x.0.iter().all(|c| ALPH.contains(c)));
    }

    #[test]
    fn gap_changes_length_by_e_n() {
        let opt = GenerateOptions {
            length: 50,
            error_rate: 0.2,
            error_model: ErrorModel::Gap,
        };
        let rng = &mut ChaCha8Rng::seed_from_u64(2);
        for _ in 0..10 {
            let (a, b) = generate_pair(&opt, rng);
            assert_eq!(a.len().abs_diff(b.len()), 10);
        }
    }

    #[test]
    fn zero_error_rate() {
        let opt = GenerateOptions {
            length: 20,
            error_rate: 0.0,
            error_model: ErrorModel::Uniform,
        };
        let (a, b) = generate_pair(&opt, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(a, b);
    }
}
