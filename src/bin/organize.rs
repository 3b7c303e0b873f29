//! Organize scraped TCF Canada topic files into consolidated JSON exports.
//!
//! Usage:
//!   cargo run --bin organize -- <topics-dir> [oral|written|all]
//!
//! Writes `organized_topics.json` (oral) and/or `organized_ee_topics.json`
//! (written) into the current directory. Set `RUST_LOG` to see per-file
//! skip details.

use std::env;
use std::process;

use tcf_topics::{Config, PipelineKind, TopicOrganizer};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: organize <topics-dir> [oral|written|all]");
        process::exit(1);
    }
    let dir = &args[1];
    let mode = args.get(2).map(String::as_str).unwrap_or("all");

    let jobs: &[(PipelineKind, &str)] = match mode {
        "oral" => &[(PipelineKind::Oral, "organized_topics.json")],
        "written" => &[(PipelineKind::Written, "organized_ee_topics.json")],
        "all" => &[
            (PipelineKind::Oral, "organized_topics.json"),
            (PipelineKind::Written, "organized_ee_topics.json"),
        ],
        other => {
            eprintln!("Unknown mode: {other} (expected oral, written, or all)");
            process::exit(1);
        }
    };

    for (kind, output) in jobs {
        let mut organizer = TopicOrganizer::new(*kind, dir, Config::default());
        if let Err(e) = organizer.load_all_topics() {
            eprintln!("{e}");
            process::exit(1);
        }

        organizer.display_sample_topics(3);

        if let Err(e) = organizer.export_organized_topics(output) {
            eprintln!("{e}");
            process::exit(1);
        }

        let report = organizer.report();
        println!(
            "\n{output}: {} topics from {} files",
            report.total_topics,
            report.files_processed.len()
        );
        if !report.failed_files.is_empty() {
            for failure in &report.failed_files {
                eprintln!("skipped {}: {}", failure.file, failure.reason);
            }
        }
        println!(
            "entries skipped: {}, rejected: {}, duplicates removed: {}",
            report.entries_skipped, report.topics_rejected, report.duplicates_removed
        );
    }
}
