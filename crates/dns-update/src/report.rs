//! Plain-text progress output
//!
//! Lines go to standard output; logging goes to standard error.

use dns_update_core::{UpdateEvent, UpdateOutcome};
use std::fmt::Display;
use std::io::Write;
use tokio::sync::mpsc;

/// Progress line for an event, if it has one
///
/// The final confirmation is printed from the outcome instead.
pub fn progress_line(event: &UpdateEvent) -> Option<String> {
    match event {
        UpdateEvent::AddressDiscovered { address } => Some(format!(
            "Obtained IP of {} to update Cloudflare's DNS.",
            address
        )),
        UpdateEvent::ZoneResolved { zone_id } => Some(format!("Obtained ZoneID {}.", zone_id)),
        UpdateEvent::RecordResolved { record_id, .. } => {
            Some(format!("Obtained record ID {} to be updated.", record_id))
        }
        UpdateEvent::RecordUpdated { .. } => None,
    }
}

/// Confirmation line for a finished update
pub fn confirmation(outcome: &UpdateOutcome, dry_run: bool) -> String {
    let line = format!(
        "Cloudflare record {} updated with {}",
        outcome.record.name, outcome.record.content
    );
    if dry_run {
        format!("[dry-run] {}", line)
    } else {
        line
    }
}

/// Print progress lines until the updater drops its sender
pub async fn print_progress<W: Write>(mut rx: mpsc::Receiver<UpdateEvent>, out: &mut W) {
    while let Some(event) = rx.recv().await {
        if let Some(line) = progress_line(&event) {
            emit(out, line);
        }
    }
}

/// Write one line; a closed stdout only loses output
pub fn emit<W: Write>(out: &mut W, line: impl Display) {
    if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
        tracing::warn!("Failed to write output: {}", e);
    }
}
