use std::path::Path;

use anyhow::Context;
use fwbench::{Graph, KernelFamily, KernelRegistry, Runner, SolvedGraph};
use serde::Serialize;

use crate::{app::GlobalOptions, commands::common::reader_bounds, output::print_output};

#[derive(Debug, Serialize)]
pub struct SolveSummary {
    pub kernel: &'static str,
    pub size: usize,
    pub reachable_pairs: usize,
    pub elapsed_ms: u64,
}

pub fn run(
    path: &Path,
    kernel: &str,
    print: bool,
    inf: i64,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let family = KernelFamily::from_name(kernel)?;
    let bounds = reader_bounds(inf)?;
    let graph = Graph::<i32>::read_from_path(path, bounds)
        .with_context(|| format!("failed to load graph: {}", path.display()))?;

    let registry = KernelRegistry::new();
    let (solved, timing) = Runner::new(&registry)
        .print_graph(print && !opts.json)
        .run_family(family, &graph)
        .with_context(|| format!("failed to run {kernel}"))?;

    let summary = SolveSummary {
        kernel: family.name(),
        size: solved.size(),
        reachable_pairs: reachable_pairs(&solved),
        elapsed_ms: timing.millis(),
    };
    print_output(&summary, opts, |s| {
        println!("Kernel:          {} ({})", s.kernel, family.label());
        println!("Vertices:        {}", s.size);
        println!("Reachable pairs: {}", s.reachable_pairs);
        println!("Time:            {} ms", s.elapsed_ms);
    })
}

fn reachable_pairs(solved: &SolvedGraph) -> usize {
    let n = solved.size();
    (0..n)
        .flat_map(|row| (0..n).map(move |col| (row, col)))
        .filter(|&(row, col)| row != col && solved.distance(row, col).is_some())
        .count()
}
