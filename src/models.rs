use crate::errors::LookupError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder rendered for any field the upstream did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

// ============ Normalized Output ============

/// One person record, normalized from whichever shape the upstream returned.
///
/// Every field holds either a non-empty upstream value or [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Mobile number.
    pub mobile: String,
    /// Subscriber name.
    pub name: String,
    /// National identity card number.
    pub cnic: String,
    /// Registered address.
    pub address: String,
    /// Telecom operator. Only the result-shaped provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// Result of a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// At least one record, in discovery order.
    Success { records: Vec<PersonRecord> },
    /// Display-ready failure.
    Failure(LookupError),
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success { .. })
    }

    /// Records of a successful search, empty slice otherwise.
    pub fn records(&self) -> &[PersonRecord] {
        match self {
            LookupOutcome::Success { records } => records,
            LookupOutcome::Failure(_) => &[],
        }
    }

    /// Human-readable failure reason, if the search failed.
    pub fn reason(&self) -> Option<String> {
        match self {
            LookupOutcome::Success { .. } => None,
            LookupOutcome::Failure(err) => Some(err.to_string()),
        }
    }

    /// The failure, if the search failed.
    pub fn error(&self) -> Option<&LookupError> {
        match self {
            LookupOutcome::Success { .. } => None,
            LookupOutcome::Failure(err) => Some(err),
        }
    }
}

impl From<LookupError> for LookupOutcome {
    fn from(err: LookupError) -> Self {
        LookupOutcome::Failure(err)
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum OutcomeBody<'a> {
    Success {
        records: &'a [PersonRecord],
    },
    Failure {
        kind: &'static str,
        reason: String,
    },
}

impl Serialize for LookupOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let body = match self {
            LookupOutcome::Success { records } => OutcomeBody::Success { records },
            LookupOutcome::Failure(err) => OutcomeBody::Failure {
                kind: err.kind(),
                reason: err.to_string(),
            },
        };
        body.serialize(serializer)
    }
}

// ============ Upstream Models ============

/// A loosely-typed record as sent by either upstream provider.
///
/// Field names vary in case between providers and even between records, so every
/// spelling is kept and resolved later through a fallback chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(rename = "Mobile", default, deserialize_with = "lenient_string")]
    pub mobile: Option<String>,
    #[serde(rename = "SUB_NO", default, deserialize_with = "lenient_string")]
    pub sub_no: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name_title: Option<String>,
    #[serde(rename = "NAME", default, deserialize_with = "lenient_string")]
    pub name_upper: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub cnic: Option<String>,
    #[serde(rename = "CNIC", default, deserialize_with = "lenient_string")]
    pub cnic_upper: Option<String>,
    #[serde(rename = "NIC", default, deserialize_with = "lenient_string")]
    pub nic: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(rename = "Address", default, deserialize_with = "lenient_string")]
    pub address_title: Option<String>,
    #[serde(rename = "ADDRESS", default, deserialize_with = "lenient_string")]
    pub address_upper: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub operator: Option<String>,
}

/// Accepts strings and numbers; anything else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// First candidate that is present and non-blank, trimmed.
fn first_present(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl RawRecord {
    pub fn resolved_mobile(&self) -> Option<String> {
        first_present(&[&self.number, &self.mobile, &self.sub_no])
    }

    pub fn resolved_name(&self) -> Option<String> {
        first_present(&[&self.name, &self.name_title, &self.name_upper])
    }

    pub fn resolved_cnic(&self) -> Option<String> {
        first_present(&[&self.cnic, &self.cnic_upper, &self.nic])
    }

    pub fn resolved_address(&self) -> Option<String> {
        first_present(&[&self.address, &self.address_title, &self.address_upper])
    }

    /// True when the lowercase `name` or `number` key carries a value.
    ///
    /// Gates `result` entries; the uppercase spellings only fill fields.
    pub fn has_name_or_number(&self) -> bool {
        first_present(&[&self.name]).is_some() || first_present(&[&self.number]).is_some()
    }

    pub fn resolved_operator(&self) -> Option<String> {
        first_present(&[&self.operator])
    }

    /// Builds a normalized record, filling gaps with [`NOT_AVAILABLE`].
    ///
    /// `with_operator` is set for the provider that reports operators; the other
    /// provider's records carry no operator field at all.
    pub fn to_person(&self, with_operator: bool) -> PersonRecord {
        let or_na = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());

        PersonRecord {
            mobile: or_na(self.resolved_mobile()),
            name: or_na(self.resolved_name()),
            cnic: or_na(self.resolved_cnic()),
            address: or_na(self.resolved_address()),
            operator: with_operator.then(|| or_na(self.resolved_operator())),
        }
    }
}

/// The payload shapes the upstream providers are known to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamPayload {
    /// Object keyed by network name, each holding a list of records.
    NetworkMap(Vec<(String, Vec<RawRecord>)>),
    /// `result` holding a list of records.
    ResultList(Vec<RawRecord>),
    /// `result` holding one record.
    ResultObject(RawRecord),
    /// `result` holding a server message instead of data.
    ResultMessage(String),
    /// `result` present but null or the empty string.
    Empty,
}

impl UpstreamPayload {
    /// Detects the payload shape by structural inspection.
    ///
    /// Returns `None` when the top-level value is not a JSON object. Entries that
    /// cannot be read as records are dropped.
    pub fn detect(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let Some(result) = object.get("result") else {
            let networks = object
                .iter()
                .filter_map(|(network, entries)| {
                    entries
                        .as_array()
                        .map(|list| (network.clone(), parse_records(list)))
                })
                .collect();
            return Some(UpstreamPayload::NetworkMap(networks));
        };

        let payload = match result {
            Value::Array(items) => UpstreamPayload::ResultList(parse_records(items)),
            Value::Object(_) => match serde_json::from_value::<RawRecord>(result.clone()) {
                Ok(record) => UpstreamPayload::ResultObject(record),
                Err(_) => UpstreamPayload::Empty,
            },
            Value::String(message) if !message.is_empty() => {
                UpstreamPayload::ResultMessage(message.clone())
            }
            _ => UpstreamPayload::Empty,
        };

        Some(payload)
    }
}

fn parse_records(items: &[Value]) -> Vec<RawRecord> {
    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value::<RawRecord>(item.clone()).ok())
        .collect()
}
