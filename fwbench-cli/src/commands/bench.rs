use std::path::Path;

use anyhow::Context;
use fwbench::{Campaign, CampaignConfig, KernelRegistry};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    output::{format_ms, print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
pub struct BenchSummary {
    pub repetitions: usize,
    pub sizes: Vec<usize>,
    pub kernels: Vec<KernelSeries>,
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct KernelSeries {
    pub kernel: &'static str,
    pub label: &'static str,
    pub missing: usize,
    /// Mean milliseconds, aligned with `BenchSummary::sizes`
    pub means: Vec<f64>,
}

pub fn run(config: CampaignConfig, out_dir: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let registry = KernelRegistry::new();
    let sizes: Vec<usize> = config.sweep()?.iter().collect();
    let results = Campaign::new(&registry, config)
        .run()
        .context("benchmark campaign failed")?;

    let files = results
        .persist(out_dir)
        .with_context(|| format!("failed to write results to {}", out_dir.display()))?;

    let kernels = results
        .families()
        .into_iter()
        .map(|family| KernelSeries {
            kernel: family.name(),
            label: family.label(),
            missing: sizes
                .iter()
                .filter_map(|&size| results.aggregate(family, size))
                .map(|aggregate| aggregate.missing)
                .sum(),
            means: results.series(family).into_iter().map(|(_, mean)| mean).collect(),
        })
        .collect();

    let summary = BenchSummary {
        repetitions: results.repetitions(),
        sizes,
        kernels,
        files: files.iter().map(|p| p.display().to_string()).collect(),
    };

    print_output(&summary, opts, |s| {
        let mut columns = vec![("Size", Align::Right)];
        columns.extend(s.kernels.iter().map(|k| (k.label, Align::Right)));
        let mut tw = TabWriter::new(&columns);
        for (i, size) in s.sizes.iter().enumerate() {
            let mut row = vec![size.to_string()];
            row.extend(s.kernels.iter().map(|k| format_ms(k.means.get(i).copied())));
            tw.row(row);
        }
        tw.print();

        println!("\nMean over {} repetitions, in milliseconds", s.repetitions);
        for k in s.kernels.iter().filter(|k| k.missing > 0) {
            println!("{}: {} samples missing", k.kernel, k.missing);
        }
        for file in &s.files {
            println!("Wrote {file}");
        }
    })
}
