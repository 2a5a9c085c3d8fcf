use anyhow::{bail, Context};
use fwbench::{KernelFamily, WeightBounds};

use crate::app::BoundsOptions;

/// Build checked weight bounds from the command-line flags.
pub fn weight_bounds(opts: &BoundsOptions) -> anyhow::Result<WeightBounds> {
    WeightBounds::new(opts.min_weight, opts.max_weight, opts.inf).context("invalid weight bounds")
}

/// Bounds for reading a graph file where only the sentinel matters.
///
/// The reader accepts any weight in `[0, inf]`, so the edge range is left as wide as the
/// sentinel allows.
pub fn reader_bounds(inf: i64) -> anyhow::Result<WeightBounds> {
    if inf < 2 {
        bail!("--inf must be at least 2, got {inf}");
    }
    WeightBounds::new(1, inf - 1, inf).context("invalid --inf")
}

/// Parse repeated `--kernel` names. `None` when no name was given.
pub fn parse_families(names: &[String]) -> anyhow::Result<Option<Vec<KernelFamily>>> {
    if names.is_empty() {
        return Ok(None);
    }
    names
        .iter()
        .map(|name| KernelFamily::from_name(name).with_context(|| format!("bad --kernel '{name}'")))
        .collect::<anyhow::Result<Vec<_>>>()
        .map(Some)
}
