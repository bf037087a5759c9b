use anyhow::Context;
use clap::Parser;
use pairwise_dp::{
    cli::{Cli, Report},
    prelude::*,
    render::Grid,
    to_string, LinearCost, NW,
};
use std::ops::ControlFlow;

fn run_pair(args: &Cli, nw: &NW<LinearCost>, a: Seq, b: Seq) -> anyhow::Result<()> {
    let (m, trace) = nw.trace(a, b).with_context(|| {
        format!("aligning {} and {}", to_string(a), to_string(b))
    })?;
    let alignment = trace.alignment(a, b);
    let report = Report::new(&alignment, &trace.cigar());

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("cost:  {}", report.cost);
    println!("cigar: {}", report.cigar);
    println!("{}", report.source);
    println!("{}", report.target);
    if args.grid {
        println!("{}", Grid::from_bytes(&m, a, b));
        println!("{}", Grid::from_bytes(&m, a, b).highlight(&trace.path()));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
    log::debug!("{}", serde_json::to_string(&args)?);

    let nw = NW::new(args.cost.cost_model());
    let mut result = Ok(());
    args.input.process_input_pairs(|a, b| match run_pair(&args, &nw, a, b) {
        Ok(()) => ControlFlow::Continue(()),
        Err(e) => {
            result = Err(e);
            ControlFlow::Break(())
        }
    })?;
    result
}
