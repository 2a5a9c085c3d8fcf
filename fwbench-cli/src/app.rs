use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fwbench - Floyd-Warshall kernels across weight widths: run, verify and benchmark
#[derive(Debug, Parser)]
#[command(name = "fwbench", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Edge weight range and sentinel, shared by every command that creates or reads graphs.
#[derive(Debug, Parser)]
pub struct BoundsOptions {
    /// Smallest generated edge weight.
    #[arg(long, default_value_t = fwbench::graph::DEFAULT_MIN_WEIGHT)]
    pub min_weight: i64,

    /// Largest generated edge weight.
    #[arg(long, default_value_t = fwbench::graph::DEFAULT_MAX_WEIGHT)]
    pub max_weight: i64,

    /// Sentinel meaning "no edge".
    #[arg(long, default_value_t = fwbench::graph::DEFAULT_INF)]
    pub inf: i64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List known kernels with their weight width, backend and availability.
    Kernels,

    /// Generate a random graph and write it in the text format.
    Generate {
        /// Number of vertices.
        #[arg(short, long, default_value_t = 10)]
        size: usize,

        /// Chance in percent that an ordered vertex pair gets an edge.
        #[arg(short, long, default_value_t = fwbench::graph::DEFAULT_PROBABILITY)]
        probability: u32,

        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        bounds: BoundsOptions,

        /// Output file. Writes to stdout if omitted.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Load a graph from a text file and solve it with one kernel.
    Solve {
        /// Path to the graph text file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Kernel identifier, e.g. FloydWarshallNative16.
        #[arg(short, long, default_value = "FloydWarshallReference")]
        kernel: String,

        /// Print the graph before and after relaxation.
        #[arg(long)]
        print: bool,

        /// Sentinel used by the file for "no edge".
        #[arg(long, default_value_t = fwbench::graph::DEFAULT_INF)]
        inf: i64,
    },

    /// Check that every kernel computes the same distances as the reference.
    Verify {
        /// Number of vertices.
        #[arg(short, long, default_value_t = fwbench::EquivalenceCheck::DEFAULT_SIZE)]
        size: usize,

        /// Chance in percent that an ordered vertex pair gets an edge.
        #[arg(short, long, default_value_t = fwbench::graph::DEFAULT_PROBABILITY)]
        probability: u32,

        /// Seed for reproducible graphs.
        #[arg(long)]
        seed: Option<u64>,

        /// Kernel to compare against the reference. Repeatable; all native kernels if omitted.
        #[arg(short, long = "kernel", value_name = "NAME")]
        kernels: Vec<String>,

        #[command(flatten)]
        bounds: BoundsOptions,

        /// Print every graph before and after relaxation.
        #[arg(long)]
        print: bool,
    },

    /// Run a benchmark campaign over a sweep of graph sizes.
    Bench {
        /// Smallest graph size.
        #[arg(long, default_value_t = 512)]
        min: usize,

        /// Largest graph size.
        #[arg(long, default_value_t = 1280)]
        max: usize,

        /// Distance between consecutive sizes.
        #[arg(long, default_value_t = 32)]
        step: usize,

        /// Number of passes over the whole sweep.
        #[arg(short, long, default_value_t = 100)]
        repetitions: usize,

        /// Chance in percent that an ordered vertex pair gets an edge.
        #[arg(short, long, default_value_t = fwbench::graph::DEFAULT_PROBABILITY)]
        probability: u32,

        /// Seed for reproducible graphs.
        #[arg(long)]
        seed: Option<u64>,

        /// Kernel to time. Repeatable; all kernels if omitted.
        #[arg(short, long = "kernel", value_name = "NAME")]
        kernels: Vec<String>,

        #[command(flatten)]
        bounds: BoundsOptions,

        /// Directory receiving one `<kernel>.txt` result file per kernel.
        #[arg(short, long, value_name = "DIR", default_value = "results")]
        out_dir: PathBuf,
    },
}
