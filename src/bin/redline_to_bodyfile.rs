//! redline_to_bodyfile - Convert a Redline file audit to body file output.
//!
//! This tool reads the files-api XML export from a Redline audit and
//! writes a body file line for every entry whose full path starts with
//! the requested directory or file path prefix.
//!
//! # Usage
//!
//! ```bash
//! redline_to_bodyfile -f <RedlineAuditFile.xml> -d "path to search"
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Everything under c:\documents
//! redline_to_bodyfile -f redline_audit.xml -d 'c:\documents'
//!
//! # A single file
//! redline_to_bodyfile -f redline_audit.xml -d /home/user/doc.txt
//! ```
//!
//! # Output
//!
//! One pipe-delimited body file line per matching entry on stdout, in the
//! order entries appear in the audit, suitable as `mactime` input.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;

use redline_bodyfile::bodyfile;
use redline_bodyfile::reader::{AuditReader, Event};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a Redline file audit to body file output.
///
/// Reads a Redline files-api audit export and emits a body file timeline
/// line for every entry under the requested path prefix.
#[derive(Parser, Debug)]
#[command(name = "redline_to_bodyfile")]
#[command(version = VERSION)]
#[command(about = "Convert a Redline file audit to body file output")]
#[command(
    long_about = "Reads the files-api XML export from a Redline audit and writes a \
    body file line for every entry whose FullPath starts with the requested prefix."
)]
struct Args {
    /// The Redline audit file
    #[arg(short = 'f', value_name = "AUDIT_FILE")]
    file: PathBuf,

    /// The directory to scan (no trailing slash) or full file path
    #[arg(short = 'd', value_name = "PATH")]
    directory: String,

    /// Enable debug output
    ///
    /// Prints additional information about processing to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.debug {
        eprintln!("Debug mode enabled");
        eprintln!("Processing: {}", args.file.display());
        eprintln!("Prefix: {}", args.directory);
    }

    let file = File::open(&args.file).map_err(|e| {
        eprintln!("Error opening {}: {}", args.file.display(), e);
        e
    })?;
    let reader = AuditReader::from_reader(BufReader::new(file));

    for result in reader {
        match result {
            Ok(Event::FileItem(item)) => {
                if !item.matches_prefix(&args.directory) {
                    continue;
                }
                if args.debug {
                    eprintln!("Matched: {}", item.full_path);
                }
                match bodyfile::format_item(&item) {
                    Ok(line) => println!("{}", line),
                    Err(e) => {
                        eprintln!("Error converting {}: {}", item.full_path, e);
                        return Err(e.into());
                    }
                }
            }
            Ok(_) => {
                // Ignore document boundary events
            }
            Err(e) => {
                eprintln!("Error decoding FileItem: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
