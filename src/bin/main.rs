//! RFOREST Command Line Interface
//!
//! Train decision trees and random forests on CSV data and report their
//! accuracy on the training data and, optionally, on a held-out file.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use rforest::api::{evaluate, load_labeled_csv, EvaluationReport};
use rforest::core::Result;
use rforest::{CsvOptions, Dataset, DecisionTree, ForestConfig, RandomForest};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "rforest")]
#[command(about = "Decision tree and random forest classifiers for CSV data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "RFOREST Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (logs every split decision)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a single decision tree and print it
    Tree(TreeArgs),
    /// Train a random forest of bagged trees
    Forest(ForestArgs),
    /// Show the inferred column types of a CSV file
    Inspect(InspectArgs),
}

#[derive(Args)]
struct DataArgs {
    /// Training data file (CSV with header row)
    #[arg(long)]
    data: PathBuf,

    /// Name of the label column
    #[arg(short, long)]
    target: String,

    /// Columns to ignore, comma separated
    #[arg(long, value_delimiter = ',')]
    drop: Vec<String>,

    /// Text columns reduced to their first character, comma separated
    #[arg(long, value_delimiter = ',')]
    first_char: Vec<String>,

    /// Value stored for empty cells of integer columns
    #[arg(long)]
    missing_int: Option<i64>,

    /// Value stored for empty cells of float columns
    #[arg(long)]
    missing_float: Option<f64>,

    /// Held-out data file to evaluate on
    #[arg(long)]
    test: Option<PathBuf>,

    /// JSON file with training parameters; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum tree depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Minimum number of rows needed to split a node
    #[arg(long)]
    min_leaf: Option<usize>,
}

#[derive(Args)]
struct TreeArgs {
    #[command(flatten)]
    data: DataArgs,
}

#[derive(Args)]
struct ForestArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Number of trees
    #[arg(short = 'n', long)]
    trees: Option<usize>,

    /// Seed for bootstrap sampling
    #[arg(short, long)]
    seed: Option<u64>,

    /// Build trees concurrently
    #[arg(short, long)]
    parallel: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// CSV file to inspect
    #[arg(long)]
    data: PathBuf,

    /// Value stored for empty cells of integer columns
    #[arg(long)]
    missing_int: Option<i64>,

    /// Value stored for empty cells of float columns
    #[arg(long)]
    missing_float: Option<f64>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let verbose = cli.verbose;
    let result = match cli.command {
        Commands::Tree(args) => tree_command(args, verbose),
        Commands::Forest(args) => forest_command(args, verbose),
        Commands::Inspect(args) => inspect_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn csv_options(missing_int: Option<i64>, missing_float: Option<f64>) -> CsvOptions {
    let mut options = CsvOptions::default();
    if let Some(value) = missing_int {
        options = options.with_missing_int(value);
    }
    if let Some(value) = missing_float {
        options = options.with_missing_float(value);
    }
    options
}

/// Load and clean one CSV file the same way for training and testing
fn load_dataset(args: &DataArgs, path: &Path) -> Result<Dataset> {
    info!("Loading dataset from: {path:?}");
    let options = csv_options(args.missing_int, args.missing_float);
    let mut dataset =
        load_labeled_csv(path, &args.target, &options)?.drop_columns(&args.drop[..]);
    for column in &args.first_char {
        dataset.map_text(column, |value| value.chars().take(1).collect())?;
    }
    info!(
        "Loaded {} rows with {} columns",
        dataset.n_rows(),
        dataset.n_cols()
    );
    Ok(dataset)
}

/// Merge the optional config file with command-line overrides
fn forest_config(args: &DataArgs, verbose: bool) -> Result<ForestConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading parameters from: {path:?}");
            ForestConfig::from_json_file(path)?
        }
        None => ForestConfig::default(),
    };
    if let Some(max_depth) = args.max_depth {
        config.tree.max_depth = max_depth;
    }
    if let Some(min_leaf) = args.min_leaf {
        config.tree.min_leaf = min_leaf;
    }
    config.tree.verbose |= verbose;
    Ok(config)
}

fn print_report(name: &str, report: &EvaluationReport) {
    println!(
        "{name}: {} of {} correct = {:.2}%",
        report.correct,
        report.total,
        report.accuracy() * 100.0
    );
    for (label, metrics) in &report.classes {
        println!(
            "  {label}: support {}, precision {:.4}, recall {:.4}",
            metrics.support,
            metrics.precision(),
            metrics.recall()
        );
    }
}

fn tree_command(args: TreeArgs, verbose: bool) -> Result<()> {
    let args = args.data;
    let config = forest_config(&args, verbose)?;
    let dataset = load_dataset(&args, &args.data)?;

    info!(
        "Training decision tree: max_depth={}, min_leaf={}",
        config.tree.max_depth, config.tree.min_leaf
    );
    let tree = DecisionTree::fit(&dataset, &args.target, &config.tree)?;
    info!(
        "Tree has depth {} and {} leaves",
        tree.depth(),
        tree.n_leaves()
    );

    println!("=== Decision Tree ===");
    print!("{tree}");

    print_report("Training", &evaluate(&tree, &dataset, &args.target)?);
    if let Some(test_path) = &args.test {
        let test = load_dataset(&args, test_path)?;
        print_report("Test", &evaluate(&tree, &test, &args.target)?);
    }

    Ok(())
}

fn forest_command(args: ForestArgs, verbose: bool) -> Result<()> {
    let mut config = forest_config(&args.data, verbose)?;
    if let Some(trees) = args.trees {
        config.n_trees = trees;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.parallel |= args.parallel;

    let args = args.data;
    let dataset = load_dataset(&args, &args.data)?;

    println!("Training {} decision trees", config.n_trees);
    let forest = RandomForest::fit(&dataset, &args.target, &config)?;
    if let Some(seed) = forest.seed() {
        println!("Bootstrap seed: {seed}");
    }

    println!("Making predictions");
    print_report("Training", &evaluate(&forest, &dataset, &args.target)?);
    if let Some(test_path) = &args.test {
        let test = load_dataset(&args, test_path)?;
        print_report("Test", &evaluate(&forest, &test, &args.target)?);
    }

    Ok(())
}

fn inspect_command(args: InspectArgs) -> Result<()> {
    let options = csv_options(args.missing_int, args.missing_float);
    let dataset = Dataset::from_csv_file(&args.data, &options)?;
    print!("{}", dataset.summary());
    Ok(())
}
