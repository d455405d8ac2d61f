//! # Session Handoff
//!
//! The raw webhook response travels from the submitter to the report view as
//! an [`EstimationHandoff`]. A [`SessionSlot`] holds at most one of them for
//! the lifetime of an application session: the form writes it once after a
//! successful submission, the renderer takes it once when it loads.
//!
//! ```rust
//! use estimate_core::session::{EstimationHandoff, SessionSlot};
//!
//! let mut slot = SessionSlot::new();
//! slot.store(EstimationHandoff::new(200, r#"{"projectName":"X"}"#));
//!
//! let handoff = slot.take().unwrap();
//! assert_eq!(handoff.raw, r#"{"projectName":"X"}"#);
//! assert!(slot.take().is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the slot the response has always been stored under
pub const SLOT_KEY: &str = "estimationData";

/// A successful webhook response, body kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationHandoff {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    /// HTTP status the body arrived with
    pub status: u16,
    /// Response body exactly as received
    pub raw: String,
}

impl EstimationHandoff {
    pub fn new(status: u16, raw: impl Into<String>) -> Self {
        EstimationHandoff {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            status,
            raw: raw.into(),
        }
    }

    pub fn slot_key(&self) -> &'static str {
        SLOT_KEY
    }
}

/// Single-writer, single-reader holder for the latest handoff.
#[derive(Debug, Default)]
pub struct SessionSlot {
    current: Option<EstimationHandoff>,
}

impl SessionSlot {
    pub fn new() -> Self {
        SessionSlot::default()
    }

    /// Replace the slot content with a fresh handoff
    pub fn store(&mut self, handoff: EstimationHandoff) {
        tracing::debug!(
            slot = SLOT_KEY,
            id = %handoff.id,
            bytes = handoff.raw.len(),
            "session slot written"
        );
        self.current = Some(handoff);
    }

    /// Hand the stored value to its reader, leaving the slot empty
    pub fn take(&mut self) -> Option<EstimationHandoff> {
        self.current.take()
    }

    pub fn peek(&self) -> Option<&EstimationHandoff> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// End of session
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_read_once() {
        let mut slot = SessionSlot::new();
        assert!(slot.is_empty());

        slot.store(EstimationHandoff::new(201, "[]"));
        assert_eq!(slot.peek().unwrap().status, 201);
        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_store_replaces_previous_handoff() {
        let mut slot = SessionSlot::new();
        slot.store(EstimationHandoff::new(200, "first"));
        slot.store(EstimationHandoff::new(200, "second"));
        assert_eq!(slot.take().unwrap().raw, "second");
    }

    #[test]
    fn test_clear() {
        let mut slot = SessionSlot::new();
        slot.store(EstimationHandoff::new(200, "{}"));
        slot.clear();
        assert!(slot.is_empty());
    }

    #[test]
    fn test_handoff_ids_are_unique() {
        let a = EstimationHandoff::new(200, "{}");
        let b = EstimationHandoff::new(200, "{}");
        assert_ne!(a.id, b.id);
        assert_eq!(a.slot_key(), "estimationData");
    }
}
