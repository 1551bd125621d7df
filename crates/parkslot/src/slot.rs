//! Core slot types for parkslot.
//!
//! This module defines the parking slot record and the payload issued when a
//! slot becomes occupied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Prefix of every generated slot number (`A1`, `A2`, ...).
pub const SLOT_PREFIX: &str = "A";

/// A single parking slot.
///
/// `issued_code` is present exactly when `is_occupied` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSlot {
    /// Human-readable identifier, unique and immutable (e.g. `A1`).
    pub slot_number: String,

    /// Whether the slot is currently occupied.
    pub is_occupied: bool,

    /// The code issued when the slot was last occupied.
    pub issued_code: Option<String>,
}

impl ParkingSlot {
    /// Create a vacant slot with no issued code.
    #[must_use]
    pub fn vacant(slot_number: impl Into<String>) -> Self {
        Self {
            slot_number: slot_number.into(),
            is_occupied: false,
            issued_code: None,
        }
    }

    /// Check the occupancy/code invariant for this record.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.is_occupied == self.issued_code.is_some()
    }

    /// Decode the issued code, if any.
    ///
    /// Returns `None` for vacant slots and for codes that are not a valid
    /// payload.
    #[must_use]
    pub fn issued(&self) -> Option<IssuedCode> {
        self.issued_code.as_deref().and_then(IssuedCode::decode)
    }
}

/// The payload handed to a QR renderer when a slot becomes occupied.
///
/// Uniqueness across occupancy events comes from the timestamp alone, so it is
/// best effort rather than a strong identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCode {
    /// The slot this code was issued for.
    pub slot_number: String,

    /// When the slot became occupied.
    pub timestamp: DateTime<Utc>,
}

impl IssuedCode {
    /// Issue a new code for the given slot, stamped with the current time.
    #[must_use]
    pub fn issue(slot_number: impl Into<String>) -> Self {
        Self {
            slot_number: slot_number.into(),
            timestamp: Utc::now(),
        }
    }

    /// Serialize the code into the opaque string stored with the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a previously encoded code.
    #[must_use]
    pub fn decode(encoded: &str) -> Option<Self> {
        serde_json::from_str(encoded).ok()
    }
}

/// Build the slot number at a 1-based position.
#[must_use]
pub fn slot_number_at(position: u32) -> String {
    format!("{SLOT_PREFIX}{position}")
}

/// Resolve caller input to a slot number.
///
/// Accepts either a bare slot number or the text scanned from an issued code,
/// in which case the slot number embedded in the payload is used. Surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the input is blank.
pub fn resolve_slot_reference(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_argument("slotNumber is required"));
    }

    if trimmed.starts_with('{') {
        if let Some(code) = IssuedCode::decode(trimmed) {
            let slot_number = code.slot_number.trim();
            if slot_number.is_empty() {
                return Err(Error::invalid_argument("scanned code does not name a slot"));
            }
            return Ok(slot_number.to_string());
        }
    }

    Ok(trimmed.to_string())
}
