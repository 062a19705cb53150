//! Account payloads (login, signup, profile, passwords) with their
//! client-side checks.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::session::Role;
use crate::ValidationError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl Credentials {
    /// Only farmer accounts can authenticate against the API today.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: missing fields, malformed email, or
    /// unsupported role.
    pub fn validate(&self, role: Role) -> Result<(), ValidationError> {
        check_email_and_password(&self.email, &self.password)?;
        check_role(role)
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "imgURL", skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("img_url", &self.img_url)
            .finish()
    }
}

impl SignupForm {
    /// # Errors
    ///
    /// Returns the first failing check, in the order the login form applies
    /// them, then [`ValidationError::MissingSignupFields`].
    pub fn validate(&self, role: Role) -> Result<(), ValidationError> {
        check_email_and_password(&self.email, &self.password)?;
        if [&self.name, &self.phone, &self.address]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(ValidationError::MissingSignupFields);
        }
        check_role(role)
    }
}

/// Editable farmer profile, sent to `PUT farmers/update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "imgURL")]
    pub img_url: String,
}

impl ProfileUpdate {
    /// # Errors
    ///
    /// [`ValidationError::MissingCredentials`] without an email,
    /// [`ValidationError::InvalidEmail`] for a malformed one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Body of `PUT farmers/changepassword`. The confirmation never leaves the
/// client.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

impl PasswordChange {
    /// # Errors
    ///
    /// [`ValidationError::MissingPasswordFields`] or
    /// [`ValidationError::PasswordMismatch`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.old_password.is_empty() || self.new_password.is_empty() {
            return Err(ValidationError::MissingPasswordFields);
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Body of `POST farmers/reset-password`, using the OTP from
/// `POST farmers/forgot-password`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub email: String,
    pub phone: String,
    pub otp: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordReset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordReset")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

impl PasswordReset {
    /// # Errors
    ///
    /// [`ValidationError::MissingPasswordFields`] if any field is blank,
    /// [`ValidationError::InvalidEmail`] for a malformed email.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if [&self.email, &self.phone, &self.otp, &self.new_password]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(ValidationError::MissingPasswordFields);
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

fn check_email_and_password(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn check_role(role: Role) -> Result<(), ValidationError> {
    match role {
        Role::Farmer => Ok(()),
        other => Err(ValidationError::UnsupportedRole(other)),
    }
}
