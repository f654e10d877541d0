//! Implementation of the `remember` command.

use anyhow::{Context, Result};

use super::CommandOutcome;
use crate::logger::Log;
use crate::service::CityMap;

/// Add a city to the user's favorites.
///
/// Saving a city that is already a favorite is reported as success.
pub fn handle_remember_command(
    service: &CityMap,
    user_id: i64,
    city: &str,
) -> Result<CommandOutcome> {
    let saved = service
        .add_favorite(user_id, city)
        .with_context(|| format!("Failed to save {} for user {}", city, user_id))?;

    if saved {
        Log::log_decorated(&format!("Saved {} to the favorites of user {}", city, user_id));
        Ok(CommandOutcome::Completed)
    } else {
        Log::log_warning(&format!(
            "City not found: {}. Check the spelling or run `citymap seed`",
            city
        ));
        Ok(CommandOutcome::NotFound)
    }
}
