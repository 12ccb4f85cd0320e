//! demo_mac_timeline - Produce a MAC-times timeline from a Redline audit.
//!
//! This demo reads a Redline file-audit export and produces a sorted
//! timeline of file modification, access, and change times.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example demo_mac_timeline <audit.xml>
//! ```
//!
//! # Output
//!
//! The output is a tab-separated timeline with three columns:
//! - Timestamp (ISO 8601 format)
//! - Full path
//! - Event type (modified, accessed, or changed)

use std::cmp::Ordering;
use std::env;
use std::fs::File;
use std::io::BufReader;

use redline_bodyfile::objects::parse_timestamp;
use redline_bodyfile::reader::{AuditReader, Event};

/// A timeline entry representing a single timestamp event.
#[derive(Debug)]
struct TimelineEntry {
    /// The timestamp of the event
    timestamp: String,
    /// The full path associated with the event
    full_path: String,
    /// The type of event (modified, accessed, changed)
    event_type: &'static str,
}

impl TimelineEntry {
    fn new(timestamp: String, full_path: String, event_type: &'static str) -> Self {
        Self {
            timestamp,
            full_path,
            event_type,
        }
    }
}

impl Ord for TimelineEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.full_path.cmp(&other.full_path))
            .then_with(|| self.event_type.cmp(other.event_type))
    }
}

impl PartialOrd for TimelineEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimelineEntry {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.full_path == other.full_path
            && self.event_type == other.event_type
    }
}

impl Eq for TimelineEntry {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <audit.xml>", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);
    let audit_reader = AuditReader::from_reader(reader);

    let mut timeline: Vec<TimelineEntry> = Vec::new();

    for result in audit_reader {
        match result {
            Ok(Event::FileItem(item)) => {
                // Unparsable timestamps are skipped here; this is a
                // reporting convenience, not the converter contract.
                let events = [
                    (&item.modified, "modified"),
                    (&item.accessed, "accessed"),
                    (&item.changed, "changed"),
                ];
                for (raw, event_type) in events {
                    if let Ok(time) = parse_timestamp(raw) {
                        timeline.push(TimelineEntry::new(
                            time.to_rfc3339(),
                            item.full_path.clone(),
                            event_type,
                        ));
                    }
                }
            }
            Ok(_) => {
                // Ignore document boundary events
            }
            Err(e) => {
                eprintln!("Error parsing audit: {}", e);
                return Err(e.into());
            }
        }
    }

    // Sort the timeline by timestamp
    timeline.sort();

    // Print the timeline
    for entry in &timeline {
        println!(
            "{}\t{}\t{}",
            entry.timestamp, entry.full_path, entry.event_type
        );
    }

    Ok(())
}
