//! Health derivation for garden entries.
//!
//! An entry starts `Poor` and becomes `Good` on its first watering. There is
//! no decay or wilt transition, so `Good` is sticky. The species' watering
//! frequency is passed in so a decay rule has a single place to land, but it
//! does not currently affect the outcome.

use crate::contract::model::Health;

/// Health of a freshly added entry.
pub const INITIAL_HEALTH: Health = Health::Poor;

/// Health of an entry right after a watering event.
pub fn after_watering(watered_count: i32, _water_frequency: i32) -> Health {
    if watered_count > 0 {
        Health::Good
    } else {
        INITIAL_HEALTH
    }
}
