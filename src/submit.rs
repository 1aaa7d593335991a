// Submission flow: validate the snapshot, build the record, persist it
use crate::booking::BookingRecord;
use crate::dates::nights_between;
use crate::fields::{FieldInput, FormConfig};
use crate::pricing::{estimate, RoomCategory};
use crate::store::{BookingStore, SlotStore, StoreError};
use crate::validate::{FormValidator, ValidationReport};
use thiserror::Error;
use tracing::{debug, warn};

// Why a submission did not produce a booking. Display carries the feedback
// line the page shows; the Rejected payload holds the per-field detail.
#[derive(Error, Debug)]
pub enum SubmitError {
    // Nothing was persisted; the report lists every failing field.
    #[error("Please fix the highlighted fields.")]
    Rejected(ValidationReport),

    // Validation passed but the booking could not be saved. The caller
    // keeps the user's input so they may retry.
    #[error("Failed to save booking. Please try again.")]
    Storage(#[from] StoreError),
}

// Live figures for the stay summary, recomputed whenever the dates or room
// selection change. Same arithmetic as the final submission, no separate
// code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPreview {
    pub nights: u32,
    pub price: u64,
}

// The form context: validator, store, and configuration in one explicit
// object, passed to the UI layer instead of module-level state.
pub struct BookingForm<S: SlotStore> {
    validator: FormValidator,
    store: BookingStore<S>,
    config: FormConfig,
}

impl<S: SlotStore> BookingForm<S> {
    pub fn new(config: FormConfig, slots: S) -> Self {
        Self {
            validator: FormValidator::new(config.guest_bounds),
            store: BookingStore::new(slots),
            config,
        }
    }

    // The single submission entry point. Either every rule passes and the
    // record lands in both storage slots, or an error reports the complete
    // set of problems and nothing is persisted.
    pub async fn submit(&self, input: &FieldInput) -> Result<BookingRecord, SubmitError> {
        // Cosmetic pause so the page can render its busy indicator. Zero
        // by default; no guarantee depends on it.
        if !self.config.processing_delay.is_zero() {
            tokio::time::sleep(self.config.processing_delay).await;
        }

        let report = self.validator.check(input);
        if report.has_errors() {
            debug!(errors = report.len(), "submission rejected");
            return Err(SubmitError::Rejected(report));
        }

        // Validation guarantees a known room category and a stay of at
        // least one night.
        let record = BookingRecord::build(input).expect("validated input builds a booking");

        if let Err(err) = self.store.persist(&record) {
            warn!(error = %err, "failed to save booking");
            return Err(err.into());
        }

        Ok(record)
    }

    // Pause before navigating to the summary page. The booking is already
    // durable by the time this runs.
    pub async fn redirect_pause(&self) {
        if !self.config.redirect_delay.is_zero() {
            tokio::time::sleep(self.config.redirect_delay).await;
        }
    }

    pub fn preview(&self, input: &FieldInput) -> StayPreview {
        let nights = nights_between(&input.checkin, &input.checkout);
        StayPreview {
            nights,
            price: estimate(RoomCategory::parse(&input.room), nights),
        }
    }

    // (characters used, maximum) for the special-requests counter.
    pub fn requests_usage(&self, input: &FieldInput) -> (usize, usize) {
        (
            input.requests.chars().count(),
            self.config.requests_max_chars,
        )
    }

    pub fn store(&self) -> &BookingStore<S> {
        &self.store
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }
}
