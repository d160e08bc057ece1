use std::fs::File;
use std::io::BufWriter;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use bytesize::ByteSize;
use clap::Parser;
use drivescope_core::colors::ColorStore;
use drivescope_core::{drives, export, scan, ScanPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "drivescope", about = "Directory size report generator")]
struct Args {
    /// Root directory to scan
    #[arg(required_unless_present_any = ["drives", "colors"])]
    root: Option<PathBuf>,

    /// Include hidden files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Fan large directories out across a worker pool
    #[arg(long)]
    parallel: bool,

    /// Worker pool size (defaults to the number of CPUs)
    #[arg(long)]
    max_workers: Option<NonZeroUsize>,

    /// Write the scanned tree as nested JSON
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// Write a flat CSV listing
    #[arg(long)]
    csv: Option<PathBuf>,

    /// List available drives instead of scanning
    #[arg(long)]
    drives: bool,

    /// Print the extension colour table instead of scanning
    #[arg(long)]
    colors: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.drives {
        for drive in drives::list_drives() {
            match (drive.total_bytes, drive.free_bytes) {
                (Some(total), Some(free)) => println!(
                    "{:<24} {} total, {} free",
                    drive.name,
                    ByteSize(total),
                    ByteSize(free)
                ),
                _ => println!("{:<24} {}", drive.name, drive.path.display()),
            }
        }
        return Ok(());
    }

    if args.colors {
        let store = ColorStore::open_default()?;
        for mapping in store.load() {
            println!(
                "{:<8} {:<8} {}",
                mapping.extension, mapping.color, mapping.name
            );
        }
        return Ok(());
    }

    let Some(root) = args.root else {
        anyhow::bail!("a root directory is required");
    };

    let mut policy = ScanPolicy::new()
        .with_hidden(args.include_hidden)
        .with_parallel(args.parallel);
    if let Some(workers) = args.max_workers {
        policy = policy.with_max_workers(workers.get())?;
    }

    let tree = scan(&root, &policy).with_context(|| format!("scanning {}", root.display()))?;

    if let Some(path) = &args.json {
        let report = export::to_json(&tree);
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
    }
    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::to_csv(&tree, BufWriter::new(file))?;
    }

    for entry in tree.children().unwrap_or_default() {
        let marker = if entry.is_dir() { "/" } else { "" };
        println!(
            "{:>12}  {}{}",
            ByteSize(entry.size()).to_string(),
            entry.name(),
            marker
        );
    }
    println!("{}: {} total", tree.name(), ByteSize(tree.size()));
    Ok(())
}
