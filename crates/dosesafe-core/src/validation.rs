//! Input checks performed before anything is sent or stored

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::ManualMedication;

pub const MIN_PATIENT_AGE: u32 = 1;
pub const MAX_PATIENT_AGE: u32 = 120;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Accepted upload extensions and the MIME type sent for each
const UPLOAD_TYPES: [(&str, &str); 4] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("pdf", "application/pdf"),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please enter a valid patient age (1-120 years)")]
    InvalidAge,

    #[error("Please add at least one medication")]
    NoMedications,

    #[error("Please fill in medication name and strength for all medications")]
    IncompleteMedication,

    #[error("Please select a valid image file (JPG, PNG) or PDF")]
    UnsupportedFileType,

    #[error("File size must be less than 5MB")]
    FileTooLarge,

    #[error("Please enter a message")]
    EmptyMessage,
}

pub fn validate_age(age: u32) -> Result<u32, ValidationError> {
    if (MIN_PATIENT_AGE..=MAX_PATIENT_AGE).contains(&age) {
        Ok(age)
    } else {
        Err(ValidationError::InvalidAge)
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let re = EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Every medication needs a name and a strength
pub fn validate_manual_medications(medications: &[ManualMedication]) -> Result<(), ValidationError> {
    if medications.is_empty() {
        return Err(ValidationError::NoMedications);
    }
    let incomplete = medications
        .iter()
        .any(|m| m.name.trim().is_empty() || m.strength.trim().is_empty());
    if incomplete {
        return Err(ValidationError::IncompleteMedication);
    }
    Ok(())
}

/// Check an upload's type and size; returns the MIME type to send
pub fn validate_upload(path: &Path, size_bytes: u64) -> Result<&'static str, ValidationError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(ValidationError::UnsupportedFileType)?;

    let mime = UPLOAD_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .ok_or(ValidationError::UnsupportedFileType)?;

    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(mime)
}

pub fn validate_message(message: &str) -> Result<&str, ValidationError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyMessage)
    } else {
        Ok(trimmed)
    }
}
