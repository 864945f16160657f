//! Reviewer configuration from environment variables.
//!
//! The shop is run by two people; their Discord user IDs and display
//! nicknames come from the `.env` file. The roster drives the unanimity
//! check on the dashboard and the names shown next to votes.

use std::collections::HashMap;

/// Gets a mapping of reviewer user IDs to their configured nicknames.
///
/// Reads `TEAM_USER_ID_1`, `TEAM_USER_ID_2`, `USER_NICKNAME_1`, and
/// `USER_NICKNAME_2` from the environment. Only pairs where both the user ID
/// and the nickname are set are included.
#[must_use]
pub fn get_reviewer_nicknames() -> HashMap<String, String> {
    let mut nicknames = HashMap::new();

    if let (Ok(user_id_1), Ok(nickname_1)) = (
        std::env::var("TEAM_USER_ID_1"),
        std::env::var("USER_NICKNAME_1"),
    ) {
        nicknames.insert(user_id_1, nickname_1);
    }

    if let (Ok(user_id_2), Ok(nickname_2)) = (
        std::env::var("TEAM_USER_ID_2"),
        std::env::var("USER_NICKNAME_2"),
    ) {
        nicknames.insert(user_id_2, nickname_2);
    }

    nicknames
}

/// Gets the nickname for a given user ID, if configured.
#[must_use]
pub fn get_nickname(user_id: &str) -> Option<String> {
    get_reviewer_nicknames().get(user_id).cloned()
}

/// Number of configured reviewers. Zero when the roster env vars are unset,
/// in which case unanimity checks always come back false.
#[must_use]
pub fn reviewer_count() -> usize {
    get_reviewer_nicknames().len()
}
