//! Administrator moderation commands.

use tracing::info;

use pet_portal::Portal;
use pet_portal_core::{Role, ShelterId, UserId};

use super::CliError;

/// Approve a shelter.
///
/// # Errors
///
/// Returns an error unless the administrator is logged in and the shelter exists.
pub fn approve_shelter(portal: &Portal, id: &str) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Admin])?;
    let shelter = portal.admin_approve_shelter(&session, &ShelterId::new(id))?;
    info!(id = %shelter.id, name = %shelter.name, "Shelter approved, it can now log in");
    Ok(())
}

/// Approve every pending, unblocked shelter.
///
/// # Errors
///
/// Returns an error unless the administrator is logged in.
pub fn approve_all(portal: &Portal) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Admin])?;
    let changed = portal.admin_approve_all_shelters(&session)?;
    info!(changed, "Shelters approved");
    Ok(())
}

/// Block or unblock a shelter.
///
/// # Errors
///
/// Returns an error unless the administrator is logged in and the shelter exists.
pub fn toggle_shelter_block(portal: &Portal, id: &str) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Admin])?;
    let shelter = portal.admin_toggle_shelter_block(&session, &ShelterId::new(id))?;
    info!(id = %shelter.id, state = %shelter.state(), "Shelter updated");
    Ok(())
}

/// Block or unblock an adopter.
///
/// # Errors
///
/// Returns an error unless the administrator is logged in and the user exists.
pub fn toggle_user_block(portal: &Portal, id: &str) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Admin])?;
    let user = portal.admin_toggle_user_block(&session, &UserId::new(id))?;
    info!(id = %user.id, blocked = user.blocked, "User updated");
    Ok(())
}
