//! Adoption application commands.

use clap::Args;
use tracing::info;

use pet_portal::Portal;
use pet_portal::models::{Applicant, Application};
use pet_portal_core::{ApplicationId, Decision, PetId, Role};

use super::CliError;

/// Application form fields.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Pet to apply for
    pub pet_id: String,

    /// Defaults to the logged-in adopter's name
    #[arg(long)]
    pub full_name: Option<String>,

    /// Defaults to the logged-in adopter's email
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub address: String,

    /// Housing situation (e.g., "Apartment", "House with yard")
    #[arg(long)]
    pub housing: String,

    /// Prior pet experience
    #[arg(long)]
    pub experience: String,

    /// Optional note to the shelter
    #[arg(long, default_value = "")]
    pub message: String,
}

fn log_application(application: &Application) {
    info!(
        id = %application.id,
        pet = %application.pet_name,
        pet_id = %application.pet_id,
        applicant = %application.applicant.full_name,
        status = %application.status,
        submitted = %application.created_at.format("%Y-%m-%d %H:%M"),
        "Application"
    );
}

/// Submit an application as the logged-in adopter.
///
/// # Errors
///
/// Returns an error unless an adopter is logged in, or if the pet is
/// missing, unavailable, or the form is incomplete.
pub fn apply(portal: &Portal, args: ApplyArgs) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::User])?;
    let applicant = Applicant {
        full_name: args.full_name.unwrap_or_else(|| session.name.clone()),
        email: args
            .email
            .unwrap_or_else(|| session.email.as_str().to_owned()),
        phone: args.phone,
        city: args.city,
        address: args.address,
        housing: args.housing,
        experience: args.experience,
        message: args.message,
    };

    let application = portal.submit_application(&session, &PetId::new(args.pet_id), applicant)?;
    log_application(&application);
    info!("Application submitted, the shelter will review it");
    Ok(())
}

/// List the logged-in adopter's applications.
///
/// # Errors
///
/// Returns an error unless an adopter is logged in.
pub fn mine(portal: &Portal) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::User])?;
    let mine = portal.my_applications(&session)?;
    for application in &mine.applications {
        log_application(application);
    }
    info!(
        total = mine.counts.total,
        pending = mine.counts.pending,
        approved = mine.counts.approved,
        rejected = mine.counts.rejected,
        "My applications"
    );
    Ok(())
}

/// List applications addressed to the logged-in shelter.
///
/// # Errors
///
/// Returns an error unless a shelter is logged in.
pub fn shelter(portal: &Portal) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Shelter])?;
    let applications = portal.shelter_applications(&session)?;
    for application in &applications {
        log_application(application);
    }
    info!(count = applications.len(), "Shelter applications");
    Ok(())
}

/// Approve or reject an application as the logged-in shelter.
///
/// # Errors
///
/// Returns an error unless the owning shelter is logged in and the
/// application is still pending.
pub fn decide(portal: &Portal, id: &str, decision: Decision) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Shelter])?;
    let application =
        portal.shelter_decide_application(&session, &ApplicationId::new(id), decision)?;
    log_application(&application);
    if decision == Decision::Approve {
        info!(pet_id = %application.pet_id, "Pet marked as adopted");
    }
    Ok(())
}
