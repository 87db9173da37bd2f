//! Implementation of the `filter run` and `filter batch` sub commands.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::time::Instant;

use clap::Parser;
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::candidate::Candidate;
use crate::filter::conf::FilterConf;
use crate::filter::{filter_jobs, Job, PostInheritanceFilter};
use crate::ped::{load_families, select_family};

/// Command line arguments for `filter run` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Filter the candidates of one proband", long_about = None)]
pub struct RunArgs {
    /// Path to the PED file with the family.
    #[arg(long, required = true)]
    pub path_ped: String,
    /// Identifier of the proband, required if the PED file lists several.
    #[arg(long)]
    pub proband: Option<String>,
    /// Path to JSON file with the candidates.
    #[arg(long, required = true)]
    pub path_candidates: String,
    /// Path to optional JSON configuration file.
    #[arg(long)]
    pub path_conf: Option<String>,
    /// Path to output JSON file.
    #[arg(long, required = true)]
    pub path_output: String,
}

/// Command line arguments for `filter batch` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Filter the candidates of many families", long_about = None)]
pub struct BatchArgs {
    /// Path to JSON file with a list of `{family, candidates}` jobs.
    #[arg(long, required = true)]
    pub path_jobs: String,
    /// Path to optional JSON configuration file.
    #[arg(long)]
    pub path_conf: Option<String>,
    /// Path to output JSON file.
    #[arg(long, required = true)]
    pub path_output: String,
    /// Number of threads to use (default is 1 thread per core).
    #[arg(long)]
    pub num_threads: Option<usize>,
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, anyhow::Error> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("could not open {}: {}", path, e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| anyhow::anyhow!("could not parse {}: {}", path, e))
}

fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), anyhow::Error> {
    let file = File::create(path)
        .map_err(|e| anyhow::anyhow!("could not create {}: {}", path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Main entry point for `filter run` sub command.
pub fn run(args_common: &crate::common::Args, args: &RunArgs) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    let conf = FilterConf::load(args.path_conf.as_deref())?;

    info!("Loading family...");
    let family = select_family(load_families(&args.path_ped)?, args.proband.as_deref())?;
    info!("... done loading family of proband {}", &family.child.id);

    info!("Loading candidates...");
    let before_loading = Instant::now();
    let candidates: Vec<Candidate> = read_json(&args.path_candidates)?;
    info!(
        "... done loading {} candidates in {:?}",
        candidates.len(),
        before_loading.elapsed()
    );

    info!("Filtering candidates...");
    let before_filter = Instant::now();
    let count_in = candidates.len();
    let engine = PostInheritanceFilter::new(&conf, &family);
    let result = engine.filter_candidates(candidates);
    info!("... done filtering in {:?}", before_filter.elapsed());
    info!(
        "summary: {} candidates passed out of {}",
        result.len(),
        count_in
    );

    write_json(&args.path_output, &result)?;
    info!(
        "All of `filter run` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}

/// Main entry point for `filter batch` sub command.
pub fn run_batch(args_common: &crate::common::Args, args: &BatchArgs) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    let conf = FilterConf::load(args.path_conf.as_deref())?;

    info!("Loading jobs...");
    let jobs: Vec<Job> = read_json(&args.path_jobs)?;
    info!("... done loading {} jobs", jobs.len());

    info!("Filtering candidates...");
    let before_filter = Instant::now();
    let count_in: usize = jobs.iter().map(|job| job.candidates.len()).sum();
    let result = if let Some(num_threads) = args.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?
            .install(|| filter_jobs(&conf, jobs))
    } else {
        filter_jobs(&conf, jobs)
    };
    let count_out: usize = result.iter().map(|job| job.candidates.len()).sum();
    info!("... done filtering in {:?}", before_filter.elapsed());
    info!(
        "summary: {} candidates passed out of {} in {} families",
        count_out,
        count_in,
        result.len()
    );

    write_json(&args.path_output, &result)?;
    info!(
        "All of `filter batch` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}
