// Field-level validation for the booking form
//
// Every rule is checked on every pass and all applicable errors are
// reported together, so the caller can surface the complete picture in one
// round instead of one field at a time.
use crate::dates::parse_calendar_date;
use crate::fields::{FieldId, FieldInput, GuestBounds};
use crate::pricing::RoomCategory;
use regex::Regex;

// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // A mandatory field was empty or unset.
    Required,
    // Present but syntactically invalid (email only).
    Format,
    // A numeric field fell outside its configured bounds.
    Range,
    // Two related fields were individually fine but jointly inconsistent.
    InvalidRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub kind: ErrorKind,
    pub message: String,
}

// The outcome of one validation pass. Empty means the input is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    // All errors attached to one field, in rule order.
    pub fn for_field(&self, field: FieldId) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    fn push(&mut self, field: FieldId, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            kind,
            message: message.into(),
        });
    }
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub struct FormValidator {
    email_pattern: Regex,
    bounds: GuestBounds,
}

impl FormValidator {
    pub fn new(bounds: GuestBounds) -> Self {
        Self {
            // The pattern is a literal, so compilation cannot fail.
            email_pattern: Regex::new(EMAIL_PATTERN).expect("email pattern compiles"),
            bounds,
        }
    }

    // Run every rule against the snapshot. Pure: the same input always
    // produces the same report.
    pub fn check(&self, input: &FieldInput) -> ValidationReport {
        let mut report = ValidationReport::default();

        if input.fullname.trim().is_empty() {
            report.push(
                FieldId::FullName,
                ErrorKind::Required,
                "Please enter your full name.",
            );
        }

        let email = input.email.trim();
        if email.is_empty() {
            report.push(
                FieldId::Email,
                ErrorKind::Required,
                "Please enter your email ID.",
            );
        } else if !self.email_pattern.is_match(email) {
            report.push(
                FieldId::Email,
                ErrorKind::Format,
                "Please enter a valid email address.",
            );
        }

        if input.hotel.trim().is_empty() {
            report.push(
                FieldId::Hotel,
                ErrorKind::Required,
                "Please enter the hotel name.",
            );
        }

        let checkin = parse_calendar_date(&input.checkin);
        let checkout = parse_calendar_date(&input.checkout);

        if checkin.is_none() {
            report.push(
                FieldId::CheckIn,
                ErrorKind::Required,
                "Please select a check-in date.",
            );
        }

        if checkout.is_none() {
            report.push(
                FieldId::CheckOut,
                ErrorKind::Required,
                "Please select a check-out date.",
            );
        }

        // Ordering is checked independently of the presence rules; both can
        // fire on checkout when it is present but not after checkin.
        if let (Some(start), Some(end)) = (checkin, checkout) {
            if end <= start {
                report.push(
                    FieldId::CheckOut,
                    ErrorKind::InvalidRange,
                    "Check-out date must be after check-in date.",
                );
            }
        }

        if RoomCategory::parse(&input.room).is_none() {
            report.push(
                FieldId::Room,
                ErrorKind::Required,
                "Please select a room type.",
            );
        }

        let guests_in_bounds = input
            .guests
            .trim()
            .parse::<i64>()
            .map_or(false, |count| self.bounds.contains(count));
        if !guests_in_bounds {
            report.push(
                FieldId::Guests,
                ErrorKind::Range,
                format!(
                    "Number of guests must be between {} and {}.",
                    self.bounds.min, self.bounds.max
                ),
            );
        }

        report
    }
}
