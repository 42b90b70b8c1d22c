//! Data models for chaosdash.
//!
//! Records read from the API (`Experiment`, `Target`) are transient copies
//! owned by the server. Payloads sent to the API (`NewExperiment`,
//! `NewTarget`) are built by the form handlers in [`crate::forms`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed fault type the external-target variant always requests.
pub const SERVICE_FAILURE: &str = "service-failure";

/// Discriminator of an experiment: external HTTP service or a workload selector fault.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperimentKind {
    ExternalTarget,
    PodFailure,
    NetworkDelay,
    CpuStress,
    MemoryStress,
    DiskFailure,
    ServiceFailure,
    /// Unknown kind reported by the server, kept verbatim.
    Other(String),
}

impl ExperimentKind {
    pub fn as_str(&self) -> &str {
        match self {
            ExperimentKind::ExternalTarget => "external-target",
            ExperimentKind::PodFailure => "pod-failure",
            ExperimentKind::NetworkDelay => "network-delay",
            ExperimentKind::CpuStress => "cpu-stress",
            ExperimentKind::MemoryStress => "memory-stress",
            ExperimentKind::DiskFailure => "disk-failure",
            ExperimentKind::ServiceFailure => "service-failure",
            ExperimentKind::Other(s) => s,
        }
    }

    /// Anything that is not `external-target` targets a workload selector.
    pub fn is_external(&self) -> bool {
        matches!(self, ExperimentKind::ExternalTarget)
    }

    /// Kinds offered by the creation form, in display order.
    pub fn selectable() -> Vec<ExperimentKind> {
        vec![
            ExperimentKind::ExternalTarget,
            ExperimentKind::PodFailure,
            ExperimentKind::NetworkDelay,
            ExperimentKind::CpuStress,
            ExperimentKind::MemoryStress,
            ExperimentKind::DiskFailure,
            ExperimentKind::ServiceFailure,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            ExperimentKind::ExternalTarget => "External Target",
            ExperimentKind::PodFailure => "Pod Failure",
            ExperimentKind::NetworkDelay => "Network Delay",
            ExperimentKind::CpuStress => "CPU Stress",
            ExperimentKind::MemoryStress => "Memory Stress",
            ExperimentKind::DiskFailure => "Disk Failure",
            ExperimentKind::ServiceFailure => "Service Failure",
            ExperimentKind::Other(s) => s,
        }
    }
}

impl From<String> for ExperimentKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "external-target" => ExperimentKind::ExternalTarget,
            "pod-failure" => ExperimentKind::PodFailure,
            "network-delay" => ExperimentKind::NetworkDelay,
            "cpu-stress" => ExperimentKind::CpuStress,
            "memory-stress" => ExperimentKind::MemoryStress,
            "disk-failure" => ExperimentKind::DiskFailure,
            "service-failure" => ExperimentKind::ServiceFailure,
            _ => ExperimentKind::Other(s),
        }
    }
}

impl From<&str> for ExperimentKind {
    fn from(s: &str) -> Self {
        ExperimentKind::from(s.to_string())
    }
}

impl From<ExperimentKind> for String {
    fn from(kind: ExperimentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status, assigned by the server. The client never sets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperimentStatus {
    Pending,
    Running,
    Completed,
    Failed,
    /// e.g. `cancelled`
    Other(String),
}

impl ExperimentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExperimentStatus::Pending => "pending",
            ExperimentStatus::Running => "running",
            ExperimentStatus::Completed => "completed",
            ExperimentStatus::Failed => "failed",
            ExperimentStatus::Other(s) => s,
        }
    }
}

impl From<String> for ExperimentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => ExperimentStatus::Pending,
            "running" => ExperimentStatus::Running,
            "completed" => ExperimentStatus::Completed,
            "failed" => ExperimentStatus::Failed,
            _ => ExperimentStatus::Other(s),
        }
    }
}

impl From<&str> for ExperimentStatus {
    fn from(s: &str) -> Self {
        ExperimentStatus::from(s.to_string())
    }
}

impl From<ExperimentStatus> for String {
    fn from(status: ExperimentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An experiment as returned by `GET /experiments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ExperimentKind,
    pub target: String,
    /// Parameters as sent at creation. The server may echo them back as a
    /// JSON-encoded string; they are decoded into a value either way.
    #[serde(default, deserialize_with = "json_or_string::deserialize")]
    pub parameters: serde_json::Value,
    pub duration: u64,
    pub status: ExperimentStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A target as returned by `GET /targets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub namespace: String,
    /// Value referenced by `Experiment::target`.
    pub selector: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /experiments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExperiment {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ExperimentKind,
    pub target: String,
    pub parameters: ExperimentParameters,
    pub duration: u64,
}

/// Parameter payload, keyed by the experiment kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExperimentParameters {
    External(ExternalParameters),
    Workload(WorkloadParameters),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ExternalWire")]
pub struct ExternalParameters {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub cleanup_endpoint: Option<String>,
}

#[derive(Serialize)]
struct ExternalWire {
    target_type: &'static str,
    endpoint: String,
    #[serde(rename = "type")]
    fault: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cleanup_endpoint: Option<String>,
}

impl From<ExternalParameters> for ExternalWire {
    fn from(p: ExternalParameters) -> Self {
        Self {
            target_type: "external",
            endpoint: p.endpoint,
            fault: SERVICE_FAILURE,
            auth_token: p.auth_token,
            cleanup_endpoint: p.cleanup_endpoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadParameters {
    pub namespace: String,
    /// Share of the selected workload to disrupt, 0..=100. Sent as a string:
    /// the API binds parameters as a string map.
    #[serde(with = "str_int")]
    pub percentage: u8,
}

/// Body of `POST /targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTarget {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub namespace: String,
    pub selector: String,
}

// serialize u8 as str
mod str_int {
    use serde::Serializer;

    pub fn serialize<S>(int: &u8, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(int)
    }
}

mod json_or_string {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            // Not every string is encoded JSON; keep it as-is when it does not parse.
            Value::String(s) => Ok(serde_json::from_str(&s).unwrap_or(Value::String(s))),
            other => Ok(other),
        }
    }
}

/// Timestamps arrive as RFC 3339, but bare dates (`2024-01-01`) and naive
/// date-times are accepted and read as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) => super::parse(&s)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s))),
                None => Ok(None),
            }
        }
    }
}
