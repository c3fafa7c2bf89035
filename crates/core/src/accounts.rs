//! Account, serviceman application, and support ticket validators.

use crate::error::CoreError;

/// Accepted password length range, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum number of skills a serviceman may declare.
pub const MAX_SKILLS: usize = 20;

/// Serviceman approval status ids (match `approval_statuses` seed data).
pub type ApprovalStatusId = i16;
pub const APPROVAL_ID_PENDING: ApprovalStatusId = 1;
pub const APPROVAL_ID_APPROVED: ApprovalStatusId = 2;
pub const APPROVAL_ID_REJECTED: ApprovalStatusId = 3;

/// Support ticket status names (stored in `support_tickets.status`).
pub const TICKET_OPEN: &str = "open";
pub const TICKET_RESOLVED: &str = "resolved";

/// Validate a display name.
pub fn validate_full_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Full name is required".to_string()));
    }
    if trimmed.chars().count() > 100 {
        return Err(CoreError::Validation(
            "Full name must be at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

/// Shallow email shape check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid email address: '{email}'"));
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

/// Validate a serviceman's declared skills, returning them trimmed.
pub fn normalize_skills(skills: &[String]) -> Result<Vec<String>, CoreError> {
    if skills.is_empty() {
        return Err(CoreError::Validation(
            "At least one skill is required".to_string(),
        ));
    }
    if skills.len() > MAX_SKILLS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_SKILLS} skills may be listed"
        )));
    }
    skills
        .iter()
        .map(|s| {
            let s = s.trim();
            if s.is_empty() {
                Err(CoreError::Validation("Skills must not be blank".to_string()))
            } else {
                Ok(s.to_string())
            }
        })
        .collect()
}

/// Validate a support ticket subject and body.
pub fn validate_ticket(subject: &str, message: &str) -> Result<(), CoreError> {
    if subject.trim().is_empty() {
        return Err(CoreError::Validation("Subject is required".to_string()));
    }
    if subject.chars().count() > 200 {
        return Err(CoreError::Validation(
            "Subject must be at most 200 characters".to_string(),
        ));
    }
    if message.trim().is_empty() {
        return Err(CoreError::Validation("Message is required".to_string()));
    }
    Ok(())
}
