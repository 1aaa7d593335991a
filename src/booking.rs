// The durable booking record and its builder
use crate::dates::nights_between;
use crate::fields::FieldInput;
use crate::pricing::{estimate, RoomCategory};
use serde::{Deserialize, Serialize};

// A confirmed booking. Exists only for a valid stay: nights >= 1 and a
// known room category, guaranteed by construction. Field names match the
// persisted JSON layout consumed by the summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub fullname: String,
    pub email: String,
    pub hotel: String,
    pub room: RoomCategory,
    pub guests: i64,
    pub checkin: String,
    pub checkout: String,
    pub nights: u32,
    pub price: u64,
    pub requests: String,
}

impl BookingRecord {
    // Assemble a record from an input snapshot that already passed
    // validation. Returns None when that precondition does not hold
    // (unknown room or a stay of zero nights) - a caller defect; the
    // builder does not re-validate.
    pub fn build(input: &FieldInput) -> Option<Self> {
        let room = RoomCategory::parse(&input.room)?;
        let nights = nights_between(&input.checkin, &input.checkout);
        if nights == 0 {
            return None;
        }
        let guests = input.guests.trim().parse::<i64>().ok()?;

        Some(Self {
            fullname: input.fullname.clone(),
            email: input.email.clone(),
            hotel: input.hotel.clone(),
            room,
            guests,
            checkin: input.checkin.clone(),
            checkout: input.checkout.clone(),
            nights,
            price: estimate(Some(room), nights),
            requests: input.requests.trim().to_string(),
        })
    }
}
