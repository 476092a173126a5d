//! # chatview CLI
//!
//! Command-line front end for the chatview library.

use std::path::Path;
use std::process;

use clap::Parser as ClapParser;

use chatview::cli::{Args, Command};
use chatview::convert::convert_tree;
use chatview::decoder::StreamDecoder;
use chatview::logging;
use chatview::progress::stdout_progress;
use chatview::viewer::{SearchOutcome, Viewer, plain_text};
use chatview::{ChatviewError, Result};

fn main() {
    let args = match <Args as ClapParser>::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    logging::init(args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Convert {
            input_dir,
            output_dir,
        } => convert(args, input_dir, output_dir),
        Command::Open { paths } => {
            let mut viewer = open_viewer(args)?;
            let added = viewer.open_paths(paths)?;
            for path in &added {
                println!("{}", path.display());
            }
            println!(
                "Registered {} new file(s), {} in session",
                added.len(),
                viewer.files().len()
            );
            Ok(())
        }
        Command::List => {
            let viewer = open_viewer(args)?;
            for path in viewer.files() {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Show { file, text } => {
            let viewer = Viewer::new(args.viewer_config())?;
            let rendered = viewer.render(file)?;
            if *text {
                println!("{}", plain_text(&rendered.html));
            } else {
                print!("{}", rendered.html);
            }
            Ok(())
        }
        Command::Search {
            file,
            query,
            previous,
            count,
        } => search(args, file, query, *previous, *count),
        Command::ClearCache => {
            Viewer::new(args.viewer_config())?.clear_cache_artifacts()?;
            println!("Cache cleared successfully.");
            Ok(())
        }
        Command::ClearSession => {
            open_viewer(args)?.clear_session()?;
            println!("Session cleared.");
            Ok(())
        }
        Command::Decode { file, diagnostics } => {
            let outcome = StreamDecoder::with_config(args.decoder_config()).decode_file(file)?;
            for record in &outcome.records {
                println!("{}", serde_json::to_string(record)?);
            }
            if *diagnostics {
                for diagnostic in &outcome.diagnostics {
                    eprintln!("{diagnostic}");
                }
                eprintln!(
                    "{} record(s), {} diagnostic(s), {} byte(s) skipped",
                    outcome.len(),
                    outcome.diagnostics.len(),
                    outcome.skipped_bytes
                );
            }
            Ok(())
        }
    }
}

fn convert(args: &Args, input: &Path, output: &Path) -> Result<()> {
    let summary = convert_tree(input, output, &args.convert_config(), &stdout_progress())?;
    if summary.is_empty() {
        println!("No JSON files found.");
    }
    Ok(())
}

fn search(args: &Args, file: &Path, query: &str, previous: bool, count: usize) -> Result<()> {
    let mut viewer = Viewer::new(args.viewer_config())?;
    let doc = viewer.open_document(file)?;

    for _ in 0..count {
        let outcome = if previous {
            doc.find_previous(query)
        } else {
            doc.find_next(query)
        };

        match outcome {
            SearchOutcome::Found(sel) => {
                println!("{}..{}: {}", sel.start, sel.end, doc.selected_text());
            }
            SearchOutcome::Wrapped(sel) => {
                println!("(wrapped) {}..{}: {}", sel.start, sel.end, doc.selected_text());
            }
            SearchOutcome::NoMatches => {
                println!("No matches found.");
                break;
            }
            SearchOutcome::EmptyQuery => {
                return Err(ChatviewError::invalid_input("search query is empty"));
            }
        }
    }
    Ok(())
}

/// Creates the viewer and restores the saved session.
fn open_viewer(args: &Args) -> Result<Viewer> {
    let mut viewer = Viewer::new(args.viewer_config())?;
    viewer.load_session()?;
    Ok(viewer)
}
