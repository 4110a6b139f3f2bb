//! Booking payload validation.
//!
//! Pure shape checks: no store access, no side effects. A request that fails
//! here never reaches the catalog, so malformed input cannot cause partial
//! writes.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use afterschool_core::{DomainError, DomainResult};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8,12}$").unwrap());

/// A candidate booking as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub lesson_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

impl BookingRequest {
    /// Accept only a fully well-formed payload, with a reason on rejection.
    pub fn validate(&self) -> DomainResult<()> {
        if self.lesson_id.is_empty() || self.name.is_empty() || self.phone.is_empty() {
            return Err(DomainError::validation(
                "lessonId, name and phone are all required",
            ));
        }
        if !NAME_RE.is_match(&self.name) {
            return Err(DomainError::validation(
                "name must contain only letters and spaces",
            ));
        }
        if !PHONE_RE.is_match(&self.phone) {
            return Err(DomainError::validation(
                "phone must contain 8-12 digits",
            ));
        }
        Ok(())
    }
}
