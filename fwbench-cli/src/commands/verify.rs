use anyhow::bail;
use fwbench::{verify::Verdict, EquivalenceCheck, KernelRegistry};
use serde::Serialize;

use crate::{
    app::{BoundsOptions, GlobalOptions},
    commands::common::{parse_families, weight_bounds},
    output::{print_output, Align, TabWriter},
};

pub struct VerifyOptions<'a> {
    pub size: usize,
    pub probability: u32,
    pub seed: Option<u64>,
    pub kernels: &'a [String],
    pub print: bool,
}

#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub size: usize,
    pub seed: u64,
    pub reference_ms: u64,
    pub passed: bool,
    pub kernels: Vec<KernelVerdict>,
}

#[derive(Debug, Serialize)]
pub struct KernelVerdict {
    pub kernel: &'static str,
    pub label: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatches: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
}

pub fn run(
    options: &VerifyOptions<'_>,
    bounds: &BoundsOptions,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let registry = KernelRegistry::new();
    let mut check = EquivalenceCheck::new(&registry)
        .size(options.size)
        .probability(options.probability)
        .bounds(weight_bounds(bounds)?)
        .print_graph(options.print && !opts.json);
    if let Some(seed) = options.seed {
        check = check.seed(seed);
    }
    if let Some(families) = parse_families(options.kernels)? {
        check = check.families(families);
    }

    let report = check.run()?;
    let passed = report.all_passed();

    let kernels = report
        .outcomes
        .iter()
        .map(|outcome| {
            let (status, mismatches, reason) = match &outcome.verdict {
                Verdict::Passed => ("passed", None, None),
                Verdict::Failed { mismatches } => ("FAILED", Some(*mismatches), None),
                Verdict::Skipped { reason } => ("skipped", None, Some(reason.clone())),
            };
            KernelVerdict {
                kernel: outcome.family.name(),
                label: outcome.family.label(),
                status,
                mismatches,
                reason,
                elapsed_ms: outcome.timing.map(|t| t.millis()),
            }
        })
        .collect();

    let summary = VerifyReport {
        size: report.size,
        seed: report.seed,
        reference_ms: report.reference_timing.millis(),
        passed,
        kernels,
    };

    print_output(&summary, opts, |s| {
        println!("Graph: {} vertices, seed {}", s.size, s.seed);
        println!("Reference: {} ms\n", s.reference_ms);
        let mut tw = TabWriter::new(&[
            ("Kernel", Align::Left),
            ("Status", Align::Left),
            ("Time (ms)", Align::Right),
            ("Detail", Align::Left),
        ]);
        for k in &s.kernels {
            let detail = match (&k.mismatches, &k.reason) {
                (Some(n), _) => format!("{n} differing entries"),
                (_, Some(reason)) => reason.clone(),
                _ => String::new(),
            };
            tw.row(vec![
                k.label.to_string(),
                k.status.to_string(),
                k.elapsed_ms.map_or_else(|| "-".to_string(), |ms| ms.to_string()),
                detail,
            ]);
        }
        tw.print();
    })?;

    if !passed {
        bail!("equivalence check failed");
    }
    Ok(())
}
