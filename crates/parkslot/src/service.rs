//! Slot service: the operations exposed to callers.
//!
//! The service owns the store handle and keeps the occupancy/code invariant
//! around it. The store sits behind a mutex held for the whole of each
//! operation, so a toggle's read and write are never interleaved with another
//! toggle on the same slot.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::slot::{resolve_slot_reference, IssuedCode, ParkingSlot};
use crate::storage::{SlotStats, SlotStore};

/// Outcome of a bulk initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeSummary {
    /// Number of slots now in the store.
    pub number_of_slots: u32,
    /// Human-readable confirmation.
    #[serde(skip)]
    pub message: String,
}

/// Cloneable handle to the slot operations.
#[derive(Debug, Clone)]
pub struct SlotService {
    store: Arc<Mutex<SlotStore>>,
    max_slots: u32,
}

impl SlotService {
    /// Wrap an opened store.
    ///
    /// `max_slots` bounds [`SlotService::initialize_slots`].
    #[must_use]
    pub fn new(store: SlotStore, max_slots: u32) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            max_slots,
        }
    }

    /// The largest slot count accepted by initialize.
    #[must_use]
    pub fn max_slots(&self) -> u32 {
        self.max_slots
    }

    fn lock(&self) -> Result<MutexGuard<'_, SlotStore>> {
        self.store
            .lock()
            .map_err(|_| Error::internal("slot store lock poisoned"))
    }

    /// List all slots ordered by slot number.
    ///
    /// # Errors
    ///
    /// Returns a store error if the database cannot be read.
    pub fn list_slots(&self) -> Result<Vec<ParkingSlot>> {
        self.lock()?.list_all()
    }

    /// Flip a slot between vacant and occupied.
    ///
    /// Occupying issues a fresh code stamped with the current time; vacating
    /// clears it. `slot_ref` may be a slot number or the text of a scanned
    /// code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a blank reference,
    /// [`Error::SlotNotFound`] for an unknown slot, or a store error.
    pub fn toggle_slot(&self, slot_ref: &str) -> Result<ParkingSlot> {
        let slot_number = resolve_slot_reference(slot_ref)?;

        let store = self.lock()?;
        let current = store
            .get_by_slot_number(&slot_number)?
            .ok_or_else(|| Error::slot_not_found(&slot_number))?;

        let occupied = !current.is_occupied;
        let issued_code = if occupied {
            Some(IssuedCode::issue(&slot_number).encode()?)
        } else {
            None
        };

        let updated = store.upsert_occupancy(&slot_number, occupied, issued_code.as_deref())?;
        info!(
            slot = %updated.slot_number,
            occupied = updated.is_occupied,
            "Toggled slot"
        );
        Ok(updated)
    }

    /// Replace the whole slot set with `count` vacant slots `A1..A<count>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `count` is not positive or exceeds
    /// the configured maximum; the existing slots are left untouched.
    pub fn initialize_slots(&self, count: i64) -> Result<InitializeSummary> {
        if count > i64::from(self.max_slots) {
            return Err(Error::invalid_argument(format!(
                "number of slots must not exceed {}, got {count}",
                self.max_slots
            )));
        }

        let number_of_slots = self.lock()?.replace_all(count)?;
        Ok(InitializeSummary {
            number_of_slots,
            message: format!("{number_of_slots} parking slots initialized"),
        })
    }

    /// Occupancy statistics.
    ///
    /// # Errors
    ///
    /// Returns a store error if the database cannot be read.
    pub fn stats(&self) -> Result<SlotStats> {
        self.lock()?.stats()
    }

    /// Path of the backing database.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(self.lock()?.path().to_path_buf())
    }

    /// Run a service operation on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or [`Error::Internal`] if the task
    /// panicked or was cancelled.
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&SlotService) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = self.clone();
        tokio::task::spawn_blocking(move || op(&service))
            .await
            .map_err(|e| Error::internal(format!("slot task failed: {e}")))?
    }

    /// Close the store if this is the last handle to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails to close.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.store) {
            Ok(mutex) => {
                let store = mutex
                    .into_inner()
                    .map_err(|_| Error::internal("slot store lock poisoned"))?;
                store.close()
            }
            Err(_) => {
                warn!("Slot store still in use at shutdown; leaving it to be dropped");
                Ok(())
            }
        }
    }
}
