//! HTTP API for the pairing engine.
//!
//! A single `POST /pairings` endpoint accepts roster and provider master
//! rows as JSON and returns the full pairing report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{JsonRecord, PairingRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
