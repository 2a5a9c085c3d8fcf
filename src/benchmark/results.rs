//! Per-(kernel, size) aggregation and persistence of campaign timings.

use std::{
    collections::BTreeMap,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{kernels::KernelFamily, Result};

/// One kernel invocation inside a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// The timed family
    pub family: KernelFamily,
    /// Vertex count of the graph
    pub size: usize,
    /// Zero-based repetition index
    pub repetition: usize,
    /// Whole milliseconds, `None` if the kernel could not be resolved
    pub elapsed_ms: Option<u64>,
}

/// Running totals for one (kernel, size) bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Sum of all recorded milliseconds
    pub total_ms: u64,
    /// Samples that produced a timing
    pub samples: usize,
    /// Samples whose kernel did not run
    pub missing: usize,
}

impl Aggregate {
    /// Adds one sample; a missing timing counts as zero.
    pub fn record(&mut self, elapsed_ms: Option<u64>) {
        match elapsed_ms {
            Some(ms) => {
                self.total_ms = self.total_ms.saturating_add(ms);
                self.samples += 1;
            }
            None => self.missing += 1,
        }
    }

    /// Mean over `repetitions`, with missing samples contributing zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self, repetitions: usize) -> f64 {
        if repetitions == 0 {
            return 0.0;
        }
        self.total_ms as f64 / repetitions as f64
    }
}

/// Everything a [`crate::benchmark::Campaign`] measured.
#[derive(Debug, Clone, Default)]
pub struct CampaignResults {
    repetitions: usize,
    samples: Vec<Sample>,
    aggregates: BTreeMap<(KernelFamily, usize), Aggregate>,
}

impl CampaignResults {
    pub(crate) fn new(repetitions: usize) -> Self {
        Self {
            repetitions,
            samples: Vec::new(),
            aggregates: BTreeMap::new(),
        }
    }

    pub(crate) fn record(&mut self, sample: Sample) {
        self.aggregates
            .entry((sample.family, sample.size))
            .or_default()
            .record(sample.elapsed_ms);
        self.samples.push(sample);
    }

    /// Repetition count the means are divided by.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Every recorded sample, in recording order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The bucket for `(family, size)`.
    #[must_use]
    pub fn aggregate(&self, family: KernelFamily, size: usize) -> Option<&Aggregate> {
        self.aggregates.get(&(family, size))
    }

    /// Mean milliseconds for `(family, size)`.
    #[must_use]
    pub fn mean(&self, family: KernelFamily, size: usize) -> Option<f64> {
        self.aggregate(family, size)
            .map(|aggregate| aggregate.mean(self.repetitions))
    }

    /// `(size, mean)` pairs of `family`, ordered by size.
    #[must_use]
    pub fn series(&self, family: KernelFamily) -> Vec<(usize, f64)> {
        self.aggregates
            .range((family, 0)..=(family, usize::MAX))
            .map(|(&(_, size), aggregate)| (size, aggregate.mean(self.repetitions)))
            .collect()
    }

    /// Families with at least one bucket, in catalog order.
    #[must_use]
    pub fn families(&self) -> Vec<KernelFamily> {
        let mut families: Vec<KernelFamily> =
            self.aggregates.keys().map(|&(family, _)| family).collect();
        families.dedup();
        families
    }

    /// Writes one `<stem>.txt` file per family into `dir`, creating it if needed.
    ///
    /// Each line is `<size> <mean>` in increasing size order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the directory or a file cannot be written.
    pub fn persist<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for family in self.families() {
            let path = dir.join(format!("{}.txt", family.file_stem()));
            let mut writer = BufWriter::new(fs::File::create(&path)?);
            for (size, mean) in self.series(family) {
                writeln!(writer, "{size} {mean}")?;
            }
            writer.flush()?;
            log::debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(family: KernelFamily, size: usize, repetition: usize, ms: Option<u64>) -> Sample {
        Sample {
            family,
            size,
            repetition,
            elapsed_ms: ms,
        }
    }

    #[test]
    fn test_missing_counts_as_zero() {
        let mut results = CampaignResults::new(4);
        results.record(sample(KernelFamily::Native8, 64, 0, Some(10)));
        results.record(sample(KernelFamily::Native8, 64, 1, Some(6)));
        results.record(sample(KernelFamily::Native8, 64, 2, None));
        results.record(sample(KernelFamily::Native8, 64, 3, Some(4)));

        let aggregate = results.aggregate(KernelFamily::Native8, 64).unwrap();
        assert_eq!(aggregate.total_ms, 20);
        assert_eq!(aggregate.samples, 3);
        assert_eq!(aggregate.missing, 1);
        assert_eq!(results.mean(KernelFamily::Native8, 64), Some(5.0));
        assert_eq!(results.mean(KernelFamily::Native8, 128), None);
    }

    #[test]
    fn test_series_ordered_by_size() {
        let mut results = CampaignResults::new(1);
        results.record(sample(KernelFamily::Native16, 96, 0, Some(3)));
        results.record(sample(KernelFamily::Native16, 32, 0, Some(1)));
        results.record(sample(KernelFamily::Native32, 64, 0, Some(8)));
        results.record(sample(KernelFamily::Native16, 64, 0, Some(2)));

        assert_eq!(
            results.series(KernelFamily::Native16),
            vec![(32, 1.0), (64, 2.0), (96, 3.0)]
        );
        assert_eq!(
            results.families(),
            vec![KernelFamily::Native16, KernelFamily::Native32]
        );
    }

    #[test]
    fn test_persist() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");

        let mut results = CampaignResults::new(2);
        results.record(sample(KernelFamily::Reference, 20, 0, Some(3)));
        results.record(sample(KernelFamily::Reference, 10, 0, Some(1)));
        results.record(sample(KernelFamily::Reference, 20, 1, Some(4)));
        results.record(sample(KernelFamily::Reference, 10, 1, Some(1)));

        let written = results.persist(&out).unwrap();
        assert_eq!(written, vec![out.join("reference.txt")]);
        assert_eq!(
            fs::read_to_string(&written[0]).unwrap(),
            "10 1\n20 3.5\n"
        );
    }
}
