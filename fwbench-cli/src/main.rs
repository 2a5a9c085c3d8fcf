mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })?;

    let cli = Cli::parse();

    // fwbench progress at info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("fwbench", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Kernels => commands::kernels::run(&cli.global),
        Command::Generate {
            size,
            probability,
            seed,
            bounds,
            output,
        } => commands::generate::run(
            *size,
            *probability,
            *seed,
            bounds,
            output.as_deref(),
            &cli.global,
        ),
        Command::Solve {
            path,
            kernel,
            print,
            inf,
        } => commands::solve::run(path, kernel, *print, *inf, &cli.global),
        Command::Verify {
            size,
            probability,
            seed,
            kernels,
            bounds,
            print,
        } => commands::verify::run(
            &commands::verify::VerifyOptions {
                size: *size,
                probability: *probability,
                seed: *seed,
                kernels,
                print: *print,
            },
            bounds,
            &cli.global,
        ),
        Command::Bench {
            min,
            max,
            step,
            repetitions,
            probability,
            seed,
            kernels,
            bounds,
            out_dir,
        } => {
            let config = fwbench::CampaignConfig {
                min_size: *min,
                max_size: *max,
                step: *step,
                repetitions: *repetitions,
                probability: *probability,
                bounds: commands::common::weight_bounds(bounds)?,
                seed: *seed,
                families: commands::common::parse_families(kernels)?
                    .unwrap_or_else(|| fwbench::CampaignConfig::default().families),
            };
            commands::bench::run(config, out_dir, &cli.global)
        }
    }
}
