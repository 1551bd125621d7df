//! `parkslot` - Parking slot occupancy tracking with issued scan codes
//!
//! This library keeps a persisted set of parking slots, toggles them between
//! vacant and occupied, and issues a code payload (for rendering as a QR code)
//! whenever a slot becomes occupied. The same operations are exposed over an
//! HTTP API and the `parkslot` CLI.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod service;
pub mod slot;
pub mod storage;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use logging::init_logging;
pub use service::{InitializeSummary, SlotService};
pub use slot::{IssuedCode, ParkingSlot};
pub use storage::{SlotStats, SlotStore};
