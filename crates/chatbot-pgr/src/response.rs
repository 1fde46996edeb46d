//! Message generation for complaint tracking.
//!
//! Turns a raw PGR search response into the directive sequence the
//! renderer localizes: a header, then one summary template per complaint,
//! in the order PGR returned them.

use std::collections::BTreeMap;
use std::fmt::Display;

use chatbot_core::config::ChatbotConfig;
use chrono::{Local, TimeZone};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::TrackError;
use crate::numeral::{DigitCodeLocalizer, NumeralLocalizer};
use crate::types::{ComplaintRecord, MessageDirective, SearchResponse, SlotValue, TrackMessage};

/// Path under the citizen-facing host where a complaint's details live.
const COMPLAINT_DETAILS_PATH: &str = "/citizen/complaint-details/";

/// `dd/MM/yyyy`
const FILED_DATE_FORMAT: &str = "%d/%m/%Y";

// =============================================================================
// FormatterConfig
// =============================================================================

/// Codes and hosts the formatter writes into its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    pub track_header_code: String,
    pub summary_template_code: String,
    pub category_prefix: String,
    pub external_host: String,
    pub no_complaints_message: String,
}

impl FormatterConfig {
    pub fn from_config(config: &ChatbotConfig) -> Self {
        let loc = &config.localization;
        Self {
            track_header_code: loc.track_header_code.clone(),
            summary_template_code: loc.summary_template_code.clone(),
            category_prefix: loc.category_prefix.clone(),
            external_host: config.pgr.external_host.clone(),
            no_complaints_message: loc.no_complaints_message.clone(),
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self::from_config(&ChatbotConfig::default())
    }
}

// =============================================================================
// Search result parsing
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResultBody {
    services: Option<Vec<RawService>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawService {
    service_request_id: Option<String>,
    service_code: Option<String>,
    audit_details: Option<RawAuditDetails>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAuditDetails {
    created_time: Option<Value>,
}

impl RawService {
    fn into_record(self, index: usize) -> Result<ComplaintRecord, TrackError> {
        let missing = |field: &str| {
            TrackError::MalformedResponse(format!("services[{}]: missing {}", index, field))
        };

        let request_id = self
            .service_request_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| missing("serviceRequestId"))?;
        let category_code = self.service_code.ok_or_else(|| missing("serviceCode"))?;
        let status = self.status.ok_or_else(|| missing("status"))?;

        let created_time = self
            .audit_details
            .and_then(|audit| audit.created_time)
            .filter(|v| !v.is_null())
            .ok_or_else(|| missing("auditDetails.createdTime"))?;
        let created_at_epoch_millis = created_time.as_i64().ok_or_else(|| {
            TrackError::MalformedResponse(format!(
                "services[{}]: auditDetails.createdTime is not an integer: {}",
                index, created_time
            ))
        })?;

        Ok(ComplaintRecord {
            request_id,
            category_code,
            created_at_epoch_millis,
            status,
        })
    }
}

/// Parse a PGR search body into complaint records, keeping PGR's order.
///
/// Fails on the first record with a missing or mistyped field rather than
/// letting a placeholder reach a template slot.
pub fn parse_records(body: &str) -> Result<Vec<ComplaintRecord>, TrackError> {
    let parsed: SearchResultBody = serde_json::from_str(body)
        .map_err(|e| TrackError::MalformedResponse(format!("invalid search body: {}", e)))?;

    let services = parsed.services.ok_or_else(|| {
        TrackError::MalformedResponse("search body has no services array".to_string())
    })?;

    services
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i))
        .collect()
}

// =============================================================================
// ResponseFormatter
// =============================================================================

/// Builds tracking messages from PGR search results.
///
/// Dates are rendered in `Tz`, the system local zone unless overridden.
pub struct ResponseFormatter<L = DigitCodeLocalizer, Tz = Local> {
    config: FormatterConfig,
    localizer: L,
    time_zone: Tz,
}

impl<L: NumeralLocalizer> ResponseFormatter<L, Local> {
    pub fn new(config: FormatterConfig, localizer: L) -> Self {
        Self {
            config,
            localizer,
            time_zone: Local,
        }
    }
}

impl<L, Tz> ResponseFormatter<L, Tz>
where
    L: NumeralLocalizer,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Render filed dates in `time_zone` instead.
    pub fn with_time_zone<T: TimeZone>(self, time_zone: T) -> ResponseFormatter<L, T> {
        ResponseFormatter {
            config: self.config,
            localizer: self.localizer,
            time_zone,
        }
    }

    /// Compose the message for a raw search response.
    ///
    /// A non-2xx status is an `ExternalService` error and yields no message.
    pub fn format(&self, response: &SearchResponse) -> Result<TrackMessage, TrackError> {
        if !response.is_success() {
            error!(
                status = response.status,
                body = %response.body,
                "Exception in PGR search"
            );
            return Err(TrackError::ExternalService {
                status: response.status,
                body: response.body.clone(),
            });
        }

        let records = parse_records(&response.body)?;
        self.format_records(&records)
    }

    /// Compose the message for already-parsed records.
    pub fn format_records(&self, records: &[ComplaintRecord]) -> Result<TrackMessage, TrackError> {
        if records.is_empty() {
            debug!("No complaints found");
            return Ok(TrackMessage::text(self.config.no_complaints_message.clone()));
        }

        let count = records.len();
        debug!(count, "Formatting complaint summaries");

        let mut directives = Vec::with_capacity(1 + count * 2);
        directives.push(MessageDirective::code(self.config.track_header_code.clone()));

        for (i, record) in records.iter().enumerate() {
            if count > 1 {
                directives.extend(self.localizer.localize(&ordinal_prefix(i + 1)));
            } else {
                directives.push(MessageDirective::literal("\n"));
            }
            directives.push(self.summary_template(record)?);
        }

        Ok(TrackMessage::localized(directives))
    }

    /// Summary template for one complaint.
    pub fn summary_template(&self, record: &ComplaintRecord) -> Result<MessageDirective, TrackError> {
        let filed_date = format_filed_date(record.created_at_epoch_millis, &self.time_zone)
            .ok_or_else(|| {
                TrackError::MalformedResponse(format!(
                    "createdTime {} of {} is out of range",
                    record.created_at_epoch_millis, record.request_id
                ))
            })?;

        let mut params = BTreeMap::new();
        params.insert(
            "complaintNumber".to_string(),
            SlotValue::Numeral(self.localizer.localize(&record.request_id)),
        );
        params.insert(
            "complaintCategory".to_string(),
            SlotValue::Directive(MessageDirective::code(format!(
                "{}{}",
                self.config.category_prefix, record.category_code
            ))),
        );
        params.insert(
            "filedDate".to_string(),
            SlotValue::Numeral(self.localizer.localize(&filed_date)),
        );
        params.insert(
            "status".to_string(),
            SlotValue::Directive(MessageDirective::literal(record.status.clone())),
        );
        params.insert(
            "url".to_string(),
            SlotValue::Directive(MessageDirective::literal(
                self.complaint_url(&record.request_id),
            )),
        );

        Ok(MessageDirective::template(
            self.config.summary_template_code.clone(),
            params,
        ))
    }

    /// Citizen-facing link to a complaint, with the id percent-encoded as a
    /// single path segment.
    pub fn complaint_url(&self, request_id: &str) -> String {
        format!(
            "{}{}{}",
            self.config.external_host.trim_end_matches('/'),
            COMPLAINT_DETAILS_PATH,
            urlencoding::encode(request_id)
        )
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Numbering shown before each complaint when more than one is listed.
fn ordinal_prefix(position: usize) -> String {
    format!("\n\n*{}.* ", position)
}

/// Format epoch millis as `dd/MM/yyyy` in `tz`. `None` when out of range.
pub fn format_filed_date<Tz>(epoch_millis: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_millis_opt(epoch_millis)
        .single()
        .map(|dt| dt.format(FILED_DATE_FORMAT).to_string())
}

// =============================================================================
// Tests
// =============================================================================
