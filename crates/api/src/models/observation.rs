use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason code for a transfer between units. Observations with this reason
/// record the destination group as a `moved to` suffix.
pub const UORG_TRANSFER_REASON: &str = "UORG";

/// Free-text annotation attached to a registered asset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved_to: Option<String>,
    /// Rendered note shown to operators.
    pub note: String,
    pub recorded_at: DateTime<Utc>,
}

impl Observation {
    pub fn new(reason: &str, moved_to: Option<&str>, recorded_at: DateTime<Utc>) -> Self {
        let reason = reason.trim().to_string();
        let moved_to = moved_to
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(str::to_string);

        let note = match &moved_to {
            Some(group) if is_transfer(&reason) => format!("{reason} - moved to {group}"),
            _ => reason.clone(),
        };

        Self {
            reason,
            moved_to,
            note,
            recorded_at,
        }
    }
}

fn is_transfer(reason: &str) -> bool {
    reason
        .split_whitespace()
        .next()
        .is_some_and(|code| code.eq_ignore_ascii_case(UORG_TRANSFER_REASON))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_reason_gets_suffix() {
        let obs = Observation::new("uorg transfer", Some(" ADM "), Utc::now());
        assert_eq!(obs.note, "uorg transfer - moved to ADM");
        assert_eq!(obs.moved_to.as_deref(), Some("ADM"));
    }

    #[test]
    fn test_other_reason_ignores_destination() {
        let obs = Observation::new("damaged", Some("ADM"), Utc::now());
        assert_eq!(obs.note, "damaged");
    }
}
