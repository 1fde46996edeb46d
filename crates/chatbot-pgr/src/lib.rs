//! PGR complaint tracking for the chatbot.
//!
//! Searches the PGR service for a citizen's recent complaints and turns the
//! result into an ordered list of localization directives for the renderer.

pub mod client;
pub mod error;
pub mod numeral;
pub mod response;
pub mod tracker;
pub mod types;

pub use client::{ComplaintSearch, PgrClient};
pub use error::TrackError;
pub use numeral::{DigitCodeLocalizer, NumeralLocalizer};
pub use response::{format_filed_date, parse_records, FormatterConfig, ResponseFormatter};
pub use tracker::ComplaintTracker;
pub use types::{
    ComplaintRecord, MessageBody, MessageDirective, MessageType, RequestInfo, SearchQuery,
    SearchResponse, SlotValue, TrackMessage, TrackRequest,
};
