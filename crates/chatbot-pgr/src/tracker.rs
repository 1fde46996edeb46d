//! Complaint tracker: one "track my complaint" chat turn end to end.
//!
//! Validates the turn's input, searches PGR once and formats the result.
//! Holds no mutable state, so one tracker can serve concurrent turns.

use std::fmt::Display;

use chatbot_core::config::ChatbotConfig;
use chrono::{Local, TimeZone};
use serde_json::Value;
use tracing::{info, warn};

use crate::client::{ComplaintSearch, PgrClient};
use crate::error::TrackError;
use crate::numeral::{DigitCodeLocalizer, NumeralLocalizer};
use crate::response::{FormatterConfig, ResponseFormatter};
use crate::types::{SearchQuery, TrackMessage, TrackRequest};

/// Coordinates the PGR search and the response formatter.
pub struct ComplaintTracker<S, L = DigitCodeLocalizer, Tz = Local> {
    search: S,
    formatter: ResponseFormatter<L, Tz>,
    max_records: u32,
}

impl ComplaintTracker<PgrClient> {
    /// Build the production tracker from configuration.
    pub fn from_config(config: &ChatbotConfig) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(Self::new(
            PgrClient::from_config(&config.pgr),
            ResponseFormatter::new(
                FormatterConfig::from_config(config),
                DigitCodeLocalizer::new(config.localization.numeral_prefix.clone()),
            ),
            config.pgr.recent_complaints_count,
        ))
    }
}

impl<S, L, Tz> ComplaintTracker<S, L, Tz>
where
    S: ComplaintSearch,
    L: NumeralLocalizer,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(search: S, formatter: ResponseFormatter<L, Tz>, max_records: u32) -> Self {
        Self {
            search,
            formatter,
            max_records,
        }
    }

    pub fn max_records(&self) -> u32 {
        self.max_records
    }

    /// Run one tracking turn.
    ///
    /// Errors are returned unchanged; the caller decides what the user sees.
    pub async fn track(&self, request: &TrackRequest) -> Result<TrackMessage, TrackError> {
        let query = SearchQuery::new(request, self.max_records);
        info!(
            tenant_id = %query.tenant_id(),
            max_records = query.max_records(),
            "Tracking complaints"
        );

        let response = self.search.search(&query).await?;
        let message = self.formatter.format(&response).map_err(|e| {
            warn!(tenant_id = %query.tenant_id(), error = %e, "Complaint tracking failed");
            e
        })?;

        info!(
            tenant_id = %query.tenant_id(),
            has_complaints = message.directives().is_some(),
            "Complaint tracking message composed"
        );
        Ok(message)
    }

    /// Run one tracking turn from chat params (`tenantId`, `authToken`,
    /// `userInfo`).
    pub async fn track_params(&self, params: &Value) -> Result<TrackMessage, TrackError> {
        let request = TrackRequest::from_params(params)?;
        self.track(&request).await
    }
}
