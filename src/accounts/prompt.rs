use anyhow::{Context, Result};

/// Environment variable name for providing a password without prompting
pub const ENV_PASSWORD_VAR: &str = "FCE_SCORE_PASSWORD";

/// Check for a password in the FCE_SCORE_PASSWORD environment variable.
/// Returns Some(password) if the env var is set and non-empty, None otherwise.
pub fn password_from_env() -> Option<String> {
    match std::env::var(ENV_PASSWORD_VAR) {
        Ok(val) if !val.is_empty() => Some(val),
        _ => None,
    }
}

/// Prompt for a password without echoing it.
///
/// When `confirm` is set the password is asked for twice and both entries must match.
pub fn prompt_for_password(confirm: bool) -> Result<String> {
    let password = rpassword::prompt_password("Password: ")
        .context("Failed to read password from terminal")?;

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    if confirm {
        let again = rpassword::prompt_password("Confirm password: ")
            .context("Failed to read password from terminal")?;
        if again != password {
            anyhow::bail!("Passwords do not match");
        }
    }

    Ok(password)
}
