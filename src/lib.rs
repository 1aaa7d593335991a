// Core library for the reservation intake form

// Export modules for each stage of the intake flow
pub mod booking;
pub mod dates;
pub mod fields;
pub mod pricing;
pub mod store;
pub mod submit;
pub mod validate;

// Re-export key types for convenience
pub use booking::BookingRecord;
pub use fields::{ConfigError, FieldId, FieldInput, FormConfig, GuestBounds};
pub use pricing::{estimate, RoomCategory};
pub use store::{BookingStore, JsonFileStore, MemoryStore, SlotStore, StoreError};
pub use submit::{BookingForm, StayPreview, SubmitError};
pub use validate::{ErrorKind, FieldError, FormValidator, ValidationReport};
