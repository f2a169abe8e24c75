//! Data lifecycle and reporting commands.

use std::io::Write;
use std::path::Path;

use tracing::info;

use pet_portal::Portal;

use super::CliError;

/// Seed empty collections with the demo dataset.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn seed(portal: &Portal) -> Result<(), CliError> {
    let report = portal.initialize_if_empty()?;
    if report.is_noop() {
        info!("Nothing to seed, every collection already has data");
    } else {
        info!(
            shelters = report.shelters,
            users = report.users,
            pets = report.pets,
            applications_initialized = report.applications_initialized,
            "Seed complete"
        );
    }
    Ok(())
}

/// Clear and re-seed the pet catalog.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn reset_pets(portal: &Portal) -> Result<(), CliError> {
    let seeded = portal.reset_pet_catalog()?;
    info!(pets = seeded, "Pet catalog reset");
    Ok(())
}

/// Write the JSON snapshot to `output`, or stdout when absent.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn export(portal: &Portal, output: Option<&Path>) -> Result<(), CliError> {
    let json = portal.export_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "Snapshot exported");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

/// Report headline statistics.
pub fn stats(portal: &Portal) {
    let stats = portal.stats();
    info!(
        available_pets = stats.available_pets,
        total_applications = stats.total_applications,
        verified_shelters = stats.verified_shelters,
        adoptions = stats.adoptions,
        "Portal statistics"
    );
}
