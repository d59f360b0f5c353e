//! Plugin naming convention: `with` followed by at least one
//! non-whitespace character.

use suitewrap_core::{AppError, AppResult};

const WITH_PREFIX: &str = "with";

/// Validates a plugin name against the `with*` convention.
pub fn check_with_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::type_error("withName must be a non-empty string"));
    }
    let valid = name
        .strip_prefix(WITH_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && !rest.chars().any(char::is_whitespace));
    if !valid {
        return Err(AppError::type_error(
            "withName must start with \"with\" and contain no whitespace",
        ));
    }
    Ok(())
}
