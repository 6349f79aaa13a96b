//! TSP Dataset - Command Line Interface
//!
//! Generate, inspect and score TSP instance sets.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tsp_dataset::dataset::{Distribution, TspDataset, DEFAULT_SEED, DEFAULT_SIZE};
use tsp_dataset::error::Result;
use tsp_dataset::evaluation::get_instance_costs;
use tsp_dataset::io::{self, SetFormat};
use tsp_dataset::problem::{dataset_file_name, Problem, Tsp};
use tsp_dataset::stats::{export_costs_csv, CostSummary, DatasetSummary};

use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "tsp-dataset")]
#[command(version = "1.0")]
#[command(about = "Generate, inspect and evaluate Euclidean TSP instance sets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a dataset and write it to disk
    Generate {
        /// Points per instance
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Number of instances
        #[arg(short, long, default_value = "10000")]
        num_samples: usize,

        /// Random seed
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Dataset name used in the file name (e.g. validation, test)
        #[arg(long, default_value = "data")]
        name: String,

        /// Output directory
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// File format
        #[arg(long, value_enum, default_value = "tspset")]
        format: FileFormat,

        /// Point distribution
        #[arg(long, value_enum, default_value = "uniform")]
        distribution: PointDistribution,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print a summary of an instance set
    Inspect {
        /// Instance set file
        #[arg(short, long)]
        input: PathBuf,

        /// Records to skip
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Maximum number of instances to read
        #[arg(short, long)]
        num_samples: Option<usize>,
    },

    /// Validate and score tours against an instance set
    Evaluate {
        /// Instance set file
        #[arg(short, long)]
        input: PathBuf,

        /// Tour file, one comma separated tour per line
        #[arg(short, long)]
        tours: PathBuf,

        /// Records of the instance set to skip
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Output CSV file with one cost per instance
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum FileFormat {
    /// CSV records with a version marker
    Tspset,
    /// Nested JSON coordinate lists
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum PointDistribution {
    /// Uniform in the unit square
    Uniform,
}

/// Written next to a generated dataset
#[derive(Serialize)]
struct GenerationManifest {
    problem: &'static str,
    file: String,
    size: usize,
    num_samples: usize,
    seed: u64,
    distribution: Distribution,
    generated_at: chrono::DateTime<chrono::Utc>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { size, num_samples, seed, name, output_dir, format, distribution, force } => {
            generate_dataset(size, num_samples, seed, &name, &output_dir, format, distribution, force)
        }

        Commands::Inspect { input, offset, num_samples } => {
            inspect_dataset(&input, offset, num_samples)
        }

        Commands::Evaluate { input, tours, offset, output } => {
            evaluate_tours(&input, &tours, offset, output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn generate_dataset(
    size: usize,
    num_samples: usize,
    seed: u64,
    name: &str,
    output_dir: &Path,
    format: FileFormat,
    distribution: PointDistribution,
    force: bool,
) -> Result<()> {
    let format = match format {
        FileFormat::Tspset => SetFormat::Csv,
        FileFormat::Json => SetFormat::Json,
    };
    let distribution = match distribution {
        PointDistribution::Uniform => Distribution::Uniform,
    };

    let file_name = dataset_file_name::<Tsp>(size, name, seed, format.extension());
    let path = output_dir.join(&file_name);

    if path.exists() && !force {
        eprintln!("File {:?} already exists! Use --force to overwrite.", path);
        return Ok(());
    }
    std::fs::create_dir_all(output_dir)?;

    println!("Sampling {} instances of {} points (seed {})...", num_samples, size, seed);
    let start = Instant::now();
    let dataset = TspDataset::sample(size, num_samples, distribution, seed);

    let progress = ProgressBar::new(num_samples as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} instances written") {
        progress.set_style(style);
    }
    io::write_instances_with(&path, dataset.instances(), |written| {
        progress.set_position(written as u64)
    })?;
    progress.finish();

    let manifest = GenerationManifest {
        problem: Tsp::NAME,
        file: file_name,
        size,
        num_samples,
        seed,
        distribution,
        generated_at: chrono::Utc::now(),
    };
    let manifest_path = path.with_extension("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    println!("Dataset saved to {:?} in {:.2}s", path, start.elapsed().as_secs_f64());
    println!("Manifest saved to {:?}", manifest_path);
    Ok(())
}

fn inspect_dataset(path: &Path, offset: usize, num_samples: Option<usize>) -> Result<()> {
    let dataset = TspDataset::load(path, offset, num_samples.unwrap_or(usize::MAX))?;

    println!("========== Dataset Summary ==========\n");
    println!("{}", DatasetSummary::from_dataset(&dataset));
    Ok(())
}

fn evaluate_tours(path: &Path, tours_path: &Path, offset: usize, output: Option<PathBuf>) -> Result<()> {
    let tours = io::read_tours(tours_path)?;
    let dataset = TspDataset::load(path, offset, tours.len())?;

    log::info!("Evaluating {} tours against {} instances", tours.len(), dataset.len());
    let start = Instant::now();
    let (costs, _) = get_instance_costs(dataset.instances(), &tours)?;
    let elapsed = start.elapsed();

    println!("\n========== Results ==========");
    match CostSummary::from_costs(&costs) {
        Some(summary) => print!("{}", summary),
        None => println!("No tours evaluated"),
    }
    println!("Time: {:.4}s", elapsed.as_secs_f64());

    if let Some(out_path) = output {
        export_costs_csv(&out_path, &costs)?;
        println!("\nCosts exported to {:?}", out_path);
    }
    Ok(())
}
