mod config;
mod input;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use merkleroot::{HashAlgorithm, MerkleTree, MerkleTreeBuilder, OddNodePolicy, TreeConfig};
use merkleroot_visualize::{StepsWriter, visualize_stdout};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "merkleroot")]
#[command(version, about = "Compute a double-hash Merkle root and document every step", long_about = None)]
struct Cli {
    /// Leaf digests in hex, in tree order
    leaves: Vec<String>,

    /// Read leaves from a file, one per line (`-` for stdin)
    #[arg(short, long, conflicts_with = "leaves")]
    input: Option<PathBuf>,

    /// Use the four documented reference transaction ids
    #[arg(long, conflicts_with_all = ["leaves", "input"])]
    reference: bool,

    /// TOML file with [tree] and [output] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base hash applied twice: sha256, sha512, sha3-256, blake3
    #[arg(short, long)]
    algorithm: Option<HashAlgorithm>,

    /// What to do with the last node of an odd level: duplicate, promote
    #[arg(long)]
    odd_node_policy: Option<OddNodePolicy>,

    /// Where to write the step-by-step document
    #[arg(long)]
    steps_out: Option<PathBuf>,

    /// Do not write the step-by-step document
    #[arg(long, conflicts_with = "steps_out")]
    no_steps: bool,

    /// Print the full tree report as JSON
    #[arg(long)]
    json: bool,

    /// Draw the tree on stdout
    #[arg(long)]
    draw: bool,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Effective settings after layering flags over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    tree: TreeConfig,
    steps_file: Option<PathBuf>,
}

impl Settings {
    fn resolve(cli: &Cli, config: Config) -> Self {
        let mut tree = config.tree;
        if let Some(algorithm) = cli.algorithm {
            tree = tree.with_algorithm(algorithm);
        }
        if let Some(policy) = cli.odd_node_policy {
            tree = tree.with_odd_node_policy(policy);
        }

        let steps_file = if cli.no_steps {
            None
        } else if let Some(path) = &cli.steps_out {
            Some(path.clone())
        } else if config.output.write_steps {
            Some(config.output.steps_file)
        } else {
            None
        };

        Settings { tree, steps_file }
    }
}

fn collect_leaves(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let leaves = if cli.reference {
        input::REFERENCE_LEAVES.iter().map(|s| s.to_string()).collect()
    } else if let Some(path) = &cli.input {
        input::read_leaf_file(path)?
    } else {
        cli.leaves.iter().map(|leaf| input::normalize_leaf(leaf)).collect()
    };
    if leaves.is_empty() {
        bail!("no leaves given: pass hex digests, --input FILE or --reference");
    }
    Ok(leaves)
}

fn write_steps(tree: &MerkleTree, path: &Path) -> anyhow::Result<()> {
    let report = tree.to_report();
    let file =
        File::create(path).with_context(|| format!("creating steps file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    StepsWriter::new(&report)
        .write(&mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("writing steps file {}", path.display()))?;
    info!(path = %path.display(), "wrote steps document");
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = Settings::resolve(&cli, config);
    debug!(?settings, "resolved settings");

    let leaves = collect_leaves(&cli)?;
    let tree = MerkleTreeBuilder::new(settings.tree)
        .build_from_hex(&leaves)
        .context("building merkle tree")?;

    if let Some(path) = &settings.steps_file {
        write_steps(&tree, path)?;
        println!("Detailed steps saved to: {}", path.display());
    }
    if cli.draw {
        visualize_stdout(&tree).context("drawing tree")?;
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree.to_report())?);
    }
    println!("Merkle Root: {}", tree.root());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
