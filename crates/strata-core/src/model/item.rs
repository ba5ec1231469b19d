use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The kinds of development work an item can represent.
///
/// Unrecognized values decode as [`Kind::Unknown`] rather than failing, so a
/// snapshot written by a newer tool still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Feature,
    Bug,
    Refactor,
    Security,
    IntegrationTest,
    Deployment,
    #[serde(other)]
    #[default]
    Unknown,
}

impl Kind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Refactor => "refactor",
            Self::Security => "security",
            Self::IntegrationTest => "integration_test",
            Self::Deployment => "deployment",
            Self::Unknown => "unknown",
        }
    }
}

/// The four lifecycle states, plus an unknown fallback.
///
/// `Blocked` here is the *recorded* status, not the derived property of
/// having an incomplete dependency (see `schedule::is_blocked` for that).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotStarted,
    InProgress,
    Blocked,
    Completed,
    #[serde(other)]
    #[default]
    Unknown,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }
}

/// Scheduling priority, totally ordered: critical > high > medium > low.
///
/// Unrecognized values rank below `Low` so they are scheduled last rather
/// than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Priority {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }

    /// Numeric rank used for ordering; higher wins.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Unknown => 0,
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// One unit of development work, as read from the external store.
///
/// Externally owned and read-only to this engine: every analysis takes a
/// snapshot of these and returns derived values, never mutating the source.
/// All fields except `id` default so sparse records load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: Kind,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    /// Ids this item depends on, in the order the store lists them.
    ///
    /// May reference ids absent from the snapshot (treated as satisfied) and,
    /// in adversarial input, may form cycles.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

impl WorkItem {
    /// Construct a minimal item; tests and builders fill the rest.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: Kind::default(),
            status: Status::default(),
            priority: Priority::default(),
            dependencies: Vec::new(),
            milestone: None,
        }
    }
}

/// Error returned when parsing an enum value from text (CLI filters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Kind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "feature" => Ok(Self::Feature),
            "bug" => Ok(Self::Bug),
            "refactor" => Ok(Self::Refactor),
            "security" => Ok(Self::Security),
            "integration_test" => Ok(Self::IntegrationTest),
            "deployment" => Ok(Self::Deployment),
            _ => Err(ParseEnumError {
                expected: "type",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseEnumError {
                expected: "priority",
                got: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, Priority, Status, WorkItem};
    use std::str::FromStr;

    #[test]
    fn enum_json_roundtrips() {
        assert_eq!(serde_json::to_string(&Kind::Bug).unwrap(), "\"bug\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&Priority::Critical).unwrap(),
            "\"critical\""
        );

        assert_eq!(
            serde_json::from_str::<Kind>("\"integration_test\"").unwrap(),
            Kind::IntegrationTest
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"completed\"").unwrap(),
            Status::Completed
        );
        assert_eq!(
            serde_json::from_str::<Priority>("\"low\"").unwrap(),
            Priority::Low
        );
    }

    #[test]
    fn unrecognized_values_decode_as_unknown() {
        assert_eq!(serde_json::from_str::<Kind>("\"epic\"").unwrap(), Kind::Unknown);
        assert_eq!(
            serde_json::from_str::<Status>("\"active\"").unwrap(),
            Status::Unknown
        );
        assert_eq!(
            serde_json::from_str::<Priority>("\"urgent\"").unwrap(),
            Priority::Unknown
        );
    }

    #[test]
    fn display_parse_roundtrips() {
        for value in [
            Kind::Feature,
            Kind::Bug,
            Kind::Refactor,
            Kind::Security,
            Kind::IntegrationTest,
            Kind::Deployment,
        ] {
            assert_eq!(Kind::from_str(&value.to_string()).unwrap(), value);
        }

        for value in [
            Status::NotStarted,
            Status::InProgress,
            Status::Blocked,
            Status::Completed,
        ] {
            assert_eq!(Status::from_str(&value.to_string()).unwrap(), value);
        }

        for value in [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ] {
            assert_eq!(Priority::from_str(&value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn from_str_rejects_unknown_values() {
        assert!(Kind::from_str("chore").is_err());
        assert!(Status::from_str("doing").is_err());
        assert!(Priority::from_str("p0").is_err());
    }

    #[test]
    fn priority_total_order() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert!(Priority::Low > Priority::Unknown);
    }

    #[test]
    fn sparse_record_fills_defaults() {
        let item: WorkItem = serde_json::from_str(r#"{"id": "w-1"}"#).unwrap();
        assert_eq!(item.id, "w-1");
        assert_eq!(item.title, "");
        assert_eq!(item.kind, Kind::Unknown);
        assert_eq!(item.status, Status::Unknown);
        assert_eq!(item.priority, Priority::Medium);
        assert!(item.dependencies.is_empty());
        assert!(item.milestone.is_none());
    }

    #[test]
    fn full_record_roundtrips() {
        let json = r#"{
            "id": "w-2",
            "title": "Harden session handling",
            "type": "security",
            "status": "in_progress",
            "priority": "critical",
            "dependencies": ["w-1"],
            "milestone": "m1"
        }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, Kind::Security);
        assert_eq!(item.status, Status::InProgress);
        assert_eq!(item.priority, Priority::Critical);
        assert_eq!(item.dependencies, vec!["w-1".to_string()]);
        assert_eq!(item.milestone.as_deref(), Some("m1"));
    }
}
