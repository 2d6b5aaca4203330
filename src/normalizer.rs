//! Response normalization.
//!
//! Turns whatever the upstream sent (a network-keyed map, a `result` list, a single
//! `result` object or a server message) into a [`LookupOutcome`]. Everything here is
//! pure: no I/O, no shared state.
//!
//! # Sentinels
//!
//! The result-shaped provider reports some failures as fixed strings in `result`.
//! They are matched exactly; a reworded message falls through to
//! [`LookupError::UpstreamMessage`] and is shown verbatim.
use crate::errors::LookupError;
use crate::models::{LookupOutcome, PersonRecord, RawRecord, UpstreamPayload};
use crate::phone;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashSet;

pub const ACCESS_NOT_ALLOWED: &str = "Access Not Allowed. Please Contact Owner.";
pub const NO_SIM_OR_CNIC_DATA: &str = "No SIM or CNIC data found.";
pub const NO_SIM_DATA: &str = "No SIM data found.";

/// Message used when `result` is present but carries nothing.
pub const EMPTY_RESULT_MESSAGE: &str = "API error occurred";

/// Maps a sentinel message to its failure. Unknown text passes through verbatim.
pub fn classify_message(message: &str) -> LookupError {
    match message {
        ACCESS_NOT_ALLOWED => LookupError::AccessDenied,
        NO_SIM_OR_CNIC_DATA | NO_SIM_DATA => LookupError::NoDataFound,
        other => LookupError::UpstreamMessage(other.to_string()),
    }
}

/// Classifies a raw HTTP response into an outcome.
///
/// `body` is `None` when the body could not be parsed as JSON.
///
/// Order: a 402 is always access denied; a sentinel in `result` wins over the
/// status code; any other non-2xx status or unparsable body is a transport failure;
/// everything else is normalized.
pub fn classify_response(status: StatusCode, body: Option<&Value>) -> LookupOutcome {
    if status == StatusCode::PAYMENT_REQUIRED {
        tracing::warn!("Upstream answered 402, paid access required");
        return LookupError::AccessDenied.into();
    }

    if let Some(message) = body
        .and_then(|b| b.get("result"))
        .and_then(Value::as_str)
    {
        let err = classify_message(message);
        if !matches!(err, LookupError::UpstreamMessage(_)) {
            tracing::info!("Upstream sentinel: {}", message);
            return err.into();
        }
    }

    if !status.is_success() {
        tracing::error!("Upstream returned status {}", status);
        return LookupError::TransportOrParseFailure.into();
    }

    match body {
        Some(payload) => normalize(payload),
        None => {
            tracing::error!("Upstream body is not valid JSON");
            LookupError::TransportOrParseFailure.into()
        }
    }
}

/// Normalizes a parsed upstream payload.
pub fn normalize(payload: &Value) -> LookupOutcome {
    let Some(shape) = UpstreamPayload::detect(payload) else {
        tracing::error!("Upstream payload is not a JSON object");
        return LookupError::TransportOrParseFailure.into();
    };

    let records = match shape {
        UpstreamPayload::NetworkMap(networks) => flatten_networks(&networks),
        UpstreamPayload::ResultList(items) => collect_results(&items),
        UpstreamPayload::ResultObject(item) => collect_results(std::slice::from_ref(&item)),
        UpstreamPayload::ResultMessage(message) => {
            return classify_message(&message).into();
        }
        UpstreamPayload::Empty => {
            return LookupError::UpstreamMessage(EMPTY_RESULT_MESSAGE.to_string()).into();
        }
    };

    if records.is_empty() {
        tracing::info!("Upstream payload held no usable records");
        return LookupError::NoDataFound.into();
    }

    tracing::debug!("Normalized {} record(s)", records.len());
    LookupOutcome::Success { records }
}

/// Flattens a network-keyed map, first occurrence of each number wins.
fn flatten_networks(networks: &[(String, Vec<RawRecord>)]) -> Vec<PersonRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (network, entries) in networks {
        for entry in entries {
            let Some(mobile) = entry.resolved_mobile() else {
                tracing::debug!("Skipping {} entry without a number", network);
                continue;
            };

            if !seen.insert(phone::canonicalize(&mobile)) {
                tracing::debug!("Skipping duplicate number {} from {}", mobile, network);
                continue;
            }

            records.push(entry.to_person(false));
        }
    }

    records
}

/// Keeps `result` entries carrying a lowercase `name` or `number`.
fn collect_results(items: &[RawRecord]) -> Vec<PersonRecord> {
    items
        .iter()
        .filter(|item| item.has_name_or_number())
        .map(|item| item.to_person(true))
        .collect()
}
