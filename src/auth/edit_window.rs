//! Meal-price edit window
//!
//! A price record is Editable for a rolling window after its last change and
//! Locked afterwards. The state is never stored: it is derived on demand
//! from `last_change` and the caller-supplied `now`, so there is no timer or
//! scheduler anywhere, and tests can pin the clock. A successful edit resets
//! `last_change`, opening a fresh window. Reads are never blocked.

use crate::core::models::MealPrice;
use crate::utils::error::{HubError, Result};
use chrono::{DateTime, Duration, Utc};

/// How long a record stays editable after its last change
pub fn edit_window() -> Duration {
    Duration::hours(6)
}

/// Derived mutability state of a price record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Record may be edited; `remaining` is what's left of the window
    Editable { remaining: Duration },
    /// Window has elapsed; only reads are allowed
    Locked,
}

/// Compute the edit state of a record at the given instant.
///
/// The record is Editable iff strictly positive time remains; at exactly
/// the window boundary it is Locked.
pub fn state_at(price: &MealPrice, now: DateTime<Utc>) -> EditState {
    let remaining = edit_window() - (now - price.last_change());
    if remaining > Duration::zero() {
        EditState::Editable { remaining }
    } else {
        EditState::Locked
    }
}

/// Fail unless the record is still editable, returning the remaining window.
pub fn ensure_editable(price: &MealPrice, now: DateTime<Utc>) -> Result<Duration> {
    match state_at(price, now) {
        EditState::Editable { remaining } => Ok(remaining),
        EditState::Locked => Err(HubError::edit_window_expired()),
    }
}
