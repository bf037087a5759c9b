//! Command line arguments of the `pairwise-dp` binary.

use crate::{
    generate::{generate_pair, GenerateArgs},
    prelude::*,
    Alignment, Cigar, LinearCost, MatchCondition,
};
use anyhow::{bail, Context};
use bio::io::fasta;
use clap::{value_parser, Parser};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::ControlFlow,
    path::{Path as FsPath, PathBuf},
};

#[derive(Parser, Serialize, Deserialize, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(flatten)]
    pub input: Input,

    #[clap(flatten)]
    pub cost: CostArgs,

    /// Print the cost matrix, and the matrix with the traceback path marked.
    #[arg(long)]
    pub grid: bool,

    /// Print one JSON object per pair instead of plain text.
    #[arg(long, conflicts_with = "grid")]
    pub json: bool,

    /// Log more. Pass twice for traceback steps.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Serialize, Deserialize, Debug, Clone, Copy)]
#[clap(next_help_heading = "Cost model")]
pub struct CostArgs {
    /// Cost of substituting one symbol by another.
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub sub: Cost,

    /// Cost of inserting a symbol of the target.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub ins: Cost,

    /// Cost of deleting a symbol of the source.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub del: Cost,

    /// Only match equal symbols at positions less than W apart.
    #[arg(long, value_name = "W")]
    pub window: Option<I>,
}

impl Default for CostArgs {
    fn default() -> Self {
        let cm = LinearCost::default();
        CostArgs {
            sub: cm.sub,
            ins: cm.ins,
            del: cm.del,
            window: None,
        }
    }
}

impl CostArgs {
    pub fn cost_model(&self) -> LinearCost {
        LinearCost::linear_asymmetric(self.sub, self.ins, self.del).with_matching(
            match self.window {
                Some(w) => MatchCondition::Window(w),
                None => MatchCondition::Equal,
            },
        )
    }
}

#[derive(Parser, Serialize, Deserialize, Debug, Default)]
#[clap(next_help_heading = "Input")]
pub struct Input {
    /// The source sequence.
    #[arg(requires = "target", conflicts_with_all = ["input", "length"])]
    pub source: Option<String>,

    /// The target sequence.
    pub target: Option<String>,

    /// The .seq, .txt, or Fasta file with sequence pairs to align, or a directory of them.
    #[arg(short, long, value_parser = value_parser!(PathBuf), conflicts_with = "length")]
    pub input: Option<PathBuf>,

    /// Options to generate input pairs.
    #[clap(flatten)]
    pub generate: GenerateArgs,
}

impl Input {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(Seq, Seq) -> ControlFlow<()>,
    ) -> anyhow::Result<()> {
        if let (Some(a), Some(b)) = (&self.source, &self.target) {
            // A single pair: `Break` and `Continue` both end the input.
            match run_pair(a.as_bytes(), b.as_bytes()) {
                ControlFlow::Continue(()) | ControlFlow::Break(()) => return Ok(()),
            }
        }

        if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                let mut files = input
                    .read_dir()
                    .with_context(|| format!("reading {}", input.display()))?
                    .map_ok(|x| x.path())
                    .collect::<Result<Vec<_>, _>>()?;
                files.sort();
                files
            };
            for f in files {
                if let ControlFlow::Break(()) = Self::process_file(&f, &mut run_pair)? {
                    break;
                }
            }
            return Ok(());
        }

        let Some(opt) = self.generate.to_generate_options() else {
            bail!("Give SOURCE and TARGET, an input file with -i, or -n and -e to generate pairs.");
        };
        let seed = self.generate.seed.unwrap_or_else(|| {
            let seed = ChaCha8Rng::from_entropy().gen_range(0..u64::MAX);
            eprintln!("Seed: {seed}");
            seed
        });
        let rng = &mut ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..self.generate.cnt {
            let (a, b) = generate_pair(&opt, rng);
            if let ControlFlow::Break(()) = run_pair(&a, &b) {
                break;
            }
        }
        Ok(())
    }

    fn process_file(
        f: &FsPath,
        run_pair: &mut impl FnMut(Seq, Seq) -> ControlFlow<()>,
    ) -> anyhow::Result<ControlFlow<()>> {
        let open = || File::open(f).with_context(|| format!("opening {}", f.display()));
        let ext = f.extension().and_then(|e| e.to_str()).unwrap_or_default();
        match ext {
            "seq" | "txt" => {
                let lines = BufReader::new(open()?).lines();
                for (a, b) in lines.tuples() {
                    let (mut a, mut b) = (a?.into_bytes(), b?.into_bytes());
                    if ext == "seq" {
                        if a.first() != Some(&b'>') || b.first() != Some(&b'<') {
                            bail!("{}: expected a '>' line followed by a '<' line", f.display());
                        }
                        a.remove(0);
                        b.remove(0);
                    }
                    if let ControlFlow::Break(()) = run_pair(&a, &b) {
                        return Ok(ControlFlow::Break(()));
                    }
                }
            }
            "fna" | "fa" | "fasta" => {
                for (a, b) in fasta::Reader::new(BufReader::new(open()?))
                    .records()
                    .tuples()
                {
                    let (a, b) = (a?, b?);
                    if let ControlFlow::Break(()) = run_pair(a.seq(), b.seq()) {
                        return Ok(ControlFlow::Break(()));
                    }
                }
            }
            _ => bail!(
                "Unknown file extension {ext:?} of {}. Must be in {{seq,txt,fna,fa,fasta}}.",
                f.display()
            ),
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// The JSON output for one aligned pair.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Report {
    pub cost: Cost,
    pub cigar: String,
    pub source: String,
    pub target: String,
}

impl Report {
    pub fn new(alignment: &Alignment<u8>, cigar: &Cigar) -> Self {
        let (source, target) = alignment.rows();
        Report {
            cost: alignment.cost,
            cigar: cigar.to_string(),
            source,
            target,
        }
    }
}
