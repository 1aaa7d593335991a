// Raw field snapshot and form configuration
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// Configuration errors are raised when the form is constructed, never at
// submission time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Guest count bounds are not configured")]
    MissingGuestBounds,

    #[error("Guest count bounds are inverted: min {min} > max {max}")]
    InvalidGuestBounds { min: i64, max: i64 },
}

// Identifiers for the form fields that can carry a validation error. The
// string form matches the DOM ids the surrounding page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    FullName,
    Email,
    Hotel,
    CheckIn,
    CheckOut,
    Room,
    Guests,
}

impl FieldId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::FullName => "fullname",
            FieldId::Email => "email",
            FieldId::Hotel => "hotel",
            FieldId::CheckIn => "checkin",
            FieldId::CheckOut => "checkout",
            FieldId::Room => "room",
            FieldId::Guests => "guests",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// One raw, untrusted snapshot of every form field. Values may be empty or
// malformed; nothing is validated at this stage.
#[derive(Debug, Clone, Default)]
pub struct FieldInput {
    pub fullname: String,
    pub email: String,
    pub hotel: String,
    pub checkin: String,
    pub checkout: String,
    pub room: String,
    pub guests: String,
    pub requests: String,
}

// Inclusive guest-count bounds, sourced from the surrounding form
// configuration. Absent or inverted bounds are a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestBounds {
    pub min: i64,
    pub max: i64,
}

impl GuestBounds {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self, ConfigError> {
        let (min, max) = match (min, max) {
            (Some(min), Some(max)) => (min, max),
            _ => return Err(ConfigError::MissingGuestBounds),
        };
        if min > max {
            return Err(ConfigError::InvalidGuestBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, count: i64) -> bool {
        count >= self.min && count <= self.max
    }
}

// Form configuration
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub guest_bounds: GuestBounds,
    // Upper bound shown by the special-requests character counter.
    pub requests_max_chars: usize,
    // Cosmetic pauses so the surrounding page can render its busy/success
    // states. Both default to zero and carry no correctness weight.
    pub processing_delay: Duration,
    pub redirect_delay: Duration,
}

impl FormConfig {
    pub fn new(guest_bounds: GuestBounds) -> Self {
        Self {
            guest_bounds,
            requests_max_chars: 300,
            processing_delay: Duration::ZERO,
            redirect_delay: Duration::ZERO,
        }
    }
}
