use erc20_events_client::EventRecord;
use serde::Serialize;

use crate::EventsError;

/// The message shown when a cycle fails as a whole.
pub const FETCH_EVENTS_FAILED: &str = "Failed to fetch events";

/// The status of a retrieval cycle, as consumed by a display layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventsState {
    pub events: Vec<EventRecord>,
    pub is_loading: bool,
    /// Set only when the whole cycle failed.
    pub error: Option<String>,
}

impl EventsState {
    pub fn from_result(result: Result<Vec<EventRecord>, EventsError>) -> Self {
        match result {
            Ok(events) => Self { events, is_loading: false, error: None },
            Err(err) => {
                tracing::error!(error = %err, "Error fetching events");
                Self { events: vec![], is_loading: false, error: Some(FETCH_EVENTS_FAILED.into()) }
            }
        }
    }
}
