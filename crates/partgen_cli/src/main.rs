use std::path::Path;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use part_generator::run::{run_generation, GenerationOutcome, GenerationRequest};
use stores::FileStore;
use crate::opts::{Command, Opts};

mod opts;
mod summary;

fn main() -> anyhow::Result<()>{
    let args = argfile::expand_args(
        argfile::parse_fromfile,
        argfile::PREFIX,
    ).context("Unable to expand argument files")?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    match opts.command {
        Command::Generate { parts, library, output_dir } => {
            let request = GenerationRequest {
                parts_source: Some(parts),
                output_directory: output_dir,
                library_source: library,
            };
            generate(&request, &opts.settings)?;
        },
        Command::SetOutputDir { path } => {
            stores::settings::store_output_directory(&opts.settings, &path)?;
        },
        Command::ShowOutputDir {} => {
            match stores::settings::load_output_directory(&opts.settings)? {
                Some(path) => info!("Output directory: {}", path.display()),
                None => info!("No output directory selected"),
            }
        },
    }

    Ok(())
}

fn generate(request: &GenerationRequest, settings_path: &Path) -> anyhow::Result<()> {
    if let Some(output_directory) = &request.output_directory {
        stores::settings::store_output_directory(settings_path, output_directory)?;
    }

    let state = stores::settings::load_state(settings_path)?;

    let outcome = run_generation(request, &state, &FileStore::default())?;

    info!("{}", summary::build_summary_tree(outcome.result()));

    match outcome {
        GenerationOutcome::Created { path, result } => {
            info!("Created symbol library. symbols: {}, path: {}", result.parts.len(), path.display());
        },
        GenerationOutcome::NothingProduced { .. } => {
            info!("No symbols were copied or created.");
        },
    }

    Ok(())
}
