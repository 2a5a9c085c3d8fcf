use std::{io, path::Path};

use anyhow::Context;
use fwbench::GraphGenerator;
use serde::Serialize;

use crate::{
    app::{BoundsOptions, GlobalOptions},
    commands::common::weight_bounds,
    output::print_output,
};

#[derive(Debug, Serialize)]
pub struct GenerateSummary {
    pub size: usize,
    pub edges: usize,
    pub seed: u64,
    pub path: String,
}

pub fn run(
    size: usize,
    probability: u32,
    seed: Option<u64>,
    bounds: &BoundsOptions,
    output: Option<&Path>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let mut generator = GraphGenerator::new(weight_bounds(bounds)?);
    if let Some(seed) = seed {
        generator = generator.seeded(seed);
    }
    let graph = generator
        .generate::<i32>(size, probability)
        .context("failed to generate graph")?;

    let Some(path) = output else {
        // The graph itself is the output
        return graph
            .write_to(io::stdout().lock())
            .context("failed to write graph");
    };

    graph
        .write_to_path(path)
        .with_context(|| format!("failed to write graph: {}", path.display()))?;

    let summary = GenerateSummary {
        size: graph.size(),
        edges: graph.edge_count(),
        seed: generator.seed(),
        path: path.display().to_string(),
    };
    print_output(&summary, opts, |s| {
        println!(
            "Wrote {} vertices, {} edges (seed {}) to {}",
            s.size, s.edges, s.seed, s.path
        );
    })
}
