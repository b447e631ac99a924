//! Member detail popup state.
//!
//! Selecting a member opens the popup in a loading state and hands out a
//! ticket. Only the result carrying the most recent ticket is applied, so a
//! slow response for an earlier selection can never replace a later one.

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ApiError, MemberStore};
use crate::models::{MemberId, MemberRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Closed,
    Loading(MemberId),
    Loaded(Box<MemberRecord>),
}

/// Identifies one selection; compared on resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    id: MemberId,
}

impl DetailTicket {
    pub fn id(&self) -> &MemberId {
        &self.id
    }
}

#[derive(Error, Debug)]
pub enum DetailError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Failed to load member details")]
    Unavailable(#[source] ApiError),
}

impl From<ApiError> for DetailError {
    fn from(e: ApiError) -> Self {
        if e.is_session_expired() {
            DetailError::SessionExpired
        } else {
            DetailError::Unavailable(e)
        }
    }
}

/// Outcome of applying a fetch result
#[derive(Debug)]
pub enum Resolution {
    /// Newest selection succeeded; the popup shows the record
    Shown,
    /// Newest selection failed; the popup was closed
    Failed(DetailError),
    /// Superseded or closed meanwhile; nothing changed
    Stale,
}

#[derive(Debug)]
pub struct DetailLookup {
    state: DetailState,
    generation: u64,
}

impl Default for DetailLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailLookup {
    pub fn new() -> Self {
        Self {
            state: DetailState::Closed,
            generation: 0,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DetailState::Closed)
    }

    pub fn record(&self) -> Option<&MemberRecord> {
        match &self.state {
            DetailState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    /// Open the popup for `id` and supersede any earlier selection
    pub fn select(&mut self, id: MemberId) -> DetailTicket {
        self.generation += 1;
        debug!(id = %id, generation = self.generation, "Member details requested");
        self.state = DetailState::Loading(id.clone());
        DetailTicket {
            generation: self.generation,
            id,
        }
    }

    fn is_current(&self, ticket: &DetailTicket) -> bool {
        ticket.generation == self.generation
            && matches!(&self.state, DetailState::Loading(id) if *id == ticket.id)
    }

    pub fn resolve(
        &mut self,
        ticket: &DetailTicket,
        result: Result<MemberRecord, ApiError>,
    ) -> Resolution {
        if !self.is_current(ticket) {
            debug!(id = %ticket.id, "Dropping stale member details");
            return Resolution::Stale;
        }
        match result {
            Ok(record) => {
                self.state = DetailState::Loaded(Box::new(record));
                Resolution::Shown
            }
            Err(e) => {
                warn!(id = %ticket.id, error = %e, "Failed to load member details");
                self.state = DetailState::Closed;
                Resolution::Failed(e.into())
            }
        }
    }

    /// Close the popup; a result still in flight becomes stale
    pub fn close(&mut self) {
        self.generation += 1;
        self.state = DetailState::Closed;
    }

    /// Select, fetch from the store and resolve in one step
    pub async fn fetch<S: MemberStore>(&mut self, store: &S, id: MemberId) -> Resolution {
        let ticket = self.select(id);
        let result = store.get_member(ticket.id()).await;
        self.resolve(&ticket, result)
    }
}
