use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sortbench::bench::{dataset, run_benchmark, AlgorithmRegistry};
use sortbench::{BenchConfig, DatasetKind, ScapegoatTree, SearchTree, TreeError};

#[derive(Parser, Debug)]
#[command(name = "sortbench", about = "Benchmark harness for search tree insertion")]
struct Cli {
    /// Log each run and every subtree rebuild (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time an algorithm over freshly generated data sets.
    Run {
        /// Registered algorithm name (see `list`).
        #[arg(long, default_value = "scapegoat")]
        algorithm: String,
        /// Keys per data set.
        #[arg(long, default_value_t = 100_000)]
        size: usize,
        /// Number of timed runs.
        #[arg(long, default_value_t = 5)]
        runs: usize,
        /// Data set shape: unique, duplicates, ascending, descending.
        #[arg(long, default_value_t = DatasetKind::Unique)]
        dataset: DatasetKind,
        /// Base seed for data set generation.
        #[arg(long, default_value_t = BenchConfig::DEFAULT_SEED)]
        seed: u64,
    },
    /// List registered algorithms.
    List,
    /// Build one tree and print its structure.
    Dump {
        /// Keys to insert.
        #[arg(long, default_value_t = 16)]
        size: usize,
        /// Data set shape: unique, duplicates, ascending, descending.
        #[arg(long, default_value_t = DatasetKind::Ascending)]
        dataset: DatasetKind,
        /// Base seed for data set generation.
        #[arg(long, default_value_t = BenchConfig::DEFAULT_SEED)]
        seed: u64,
        /// Use the plain unbalanced tree instead of the scapegoat tree.
        #[arg(long)]
        unbalanced: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            algorithm,
            size,
            runs,
            dataset,
            seed,
        } => run_bench(&algorithm, size, runs, dataset, seed, cli.verbose)?,
        Commands::List => run_list(),
        Commands::Dump {
            size,
            dataset,
            seed,
            unbalanced,
        } => run_dump(size, dataset, seed, unbalanced)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_bench(
    name: &str,
    size: usize,
    runs: usize,
    dataset: DatasetKind,
    seed: u64,
    verbose: bool,
) -> Result<()> {
    let registry = AlgorithmRegistry::with_defaults();
    let algorithm = registry.require(name)?;
    let config = BenchConfig::new(size, runs)
        .context("invalid benchmark parameters")?
        .with_dataset(dataset)
        .with_seed(seed)
        .with_verbose(verbose);

    let summary = run_benchmark(algorithm, &config)
        .with_context(|| format!("benchmark of '{}' failed", name))?;

    println!(
        "{} on {} {} keys, {} runs",
        summary.algorithm, config.array_size, config.dataset, config.runs
    );
    for (run, report) in summary.reports.iter().enumerate() {
        println!("run {}\t{}", run + 1, report.line());
    }
    println!("{}", summary.timing.summary());

    Ok(())
}

fn run_list() {
    for info in AlgorithmRegistry::with_defaults().list() {
        println!("{:<12}{}", info.name, info.description);
    }
}

fn run_dump(size: usize, dataset: DatasetKind, seed: u64, unbalanced: bool) -> Result<()> {
    // Validates the size against the key range.
    BenchConfig::new(size, 1).context("invalid dump parameters")?;
    let keys = dataset::generate(dataset, size, seed);

    if unbalanced {
        let mut tree = SearchTree::with_capacity(keys.len());
        for &key in &keys {
            skip_duplicate(tree.insert(key).map(|_| ()))?;
        }
        print!("{}", tree);
        println!("size={} max_depth={}", tree.size(), tree.max_depth());
    } else {
        let mut tree = ScapegoatTree::with_capacity(keys.len());
        for &key in &keys {
            skip_duplicate(tree.add(key).map(|_| ()))?;
        }
        print!("{}", tree);
        println!(
            "size={} max_depth={} rebuilds={}",
            tree.size(),
            tree.max_depth(),
            tree.rebuilds()
        );
    }

    Ok(())
}

fn skip_duplicate(result: Result<(), TreeError>) -> Result<()> {
    match result {
        Ok(()) | Err(TreeError::DuplicateKey(_)) => Ok(()),
        Err(err) => Err(err).context("tree insertion failed"),
    }
}
