use crate::application::error::{ApplicationError, ApplicationResult};

pub(super) const MIN_PASSWORD_LENGTH: usize = 12;

/// Applied when provisioning the admin account, never at login.
pub(super) fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApplicationError::validation(format!(
            "admin password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.trim() != password {
        return Err(ApplicationError::validation(
            "admin password cannot start or end with whitespace",
        ));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_other = password.chars().any(|c| !c.is_alphabetic());
    if !(has_letter && has_other) {
        return Err(ApplicationError::validation(
            "admin password must mix letters with digits or symbols",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_password;

    #[test]
    fn rejects_short_or_single_class_passwords() {
        assert!(validate_password("short1!").is_err());
        assert!(validate_password("onlyletterspassword").is_err());
        assert!(validate_password(" padded-Secret-1 ").is_err());
        assert!(validate_password("correct-horse-42").is_ok());
    }
}
