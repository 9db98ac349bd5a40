use super::asset::Asset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    Success,
    AlreadyRegistered,
    NotFound,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Success => write!(f, "success"),
            OutcomeKind::AlreadyRegistered => write!(f, "already-registered"),
            OutcomeKind::NotFound => write!(f, "not-found"),
        }
    }
}

/// Result of presenting one identifier to the scanner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScanOutcome {
    /// The asset was unregistered and now carries a mark.
    #[serde(rename_all = "camelCase")]
    Success {
        asset: Asset,
        registered_at: DateTime<Utc>,
    },
    /// The asset already had a mark; nothing changed.
    #[serde(rename_all = "camelCase")]
    AlreadyRegistered {
        asset: Asset,
        registered_at: DateTime<Utc>,
    },
    /// No imported asset matches the scanned identifier.
    #[serde(rename_all = "camelCase")]
    NotFound { asset_id: String },
}

impl ScanOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ScanOutcome::Success { .. } => OutcomeKind::Success,
            ScanOutcome::AlreadyRegistered { .. } => OutcomeKind::AlreadyRegistered,
            ScanOutcome::NotFound { .. } => OutcomeKind::NotFound,
        }
    }

    /// Canonical id for found assets, the trimmed scanned string otherwise.
    pub fn asset_id(&self) -> &str {
        match self {
            ScanOutcome::Success { asset, .. } | ScanOutcome::AlreadyRegistered { asset, .. } => {
                &asset.asset_id
            }
            ScanOutcome::NotFound { asset_id } => asset_id,
        }
    }

    pub fn asset(&self) -> Option<&Asset> {
        match self {
            ScanOutcome::Success { asset, .. } | ScanOutcome::AlreadyRegistered { asset, .. } => {
                Some(asset)
            }
            ScanOutcome::NotFound { .. } => None,
        }
    }

    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ScanOutcome::Success { registered_at, .. }
            | ScanOutcome::AlreadyRegistered { registered_at, .. } => Some(*registered_at),
            ScanOutcome::NotFound { .. } => None,
        }
    }
}

/// One line of the scan audit log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub kind: OutcomeKind,
    pub asset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryEntry {
    pub fn from_outcome(outcome: &ScanOutcome, timestamp: DateTime<Utc>) -> Self {
        let note = match outcome {
            ScanOutcome::AlreadyRegistered { registered_at, .. } => Some(format!(
                "already registered at {}",
                registered_at.format("%Y-%m-%d %H:%M:%S")
            )),
            _ => None,
        };

        Self {
            kind: outcome.kind(),
            asset_id: outcome.asset_id().to_string(),
            asset: outcome.asset().cloned(),
            timestamp,
            note,
        }
    }
}

/// Aggregated result of a batch scan.
#[derive(Debug)]
pub struct BatchReport<E> {
    pub success: Vec<ScanOutcome>,
    pub already_registered: Vec<ScanOutcome>,
    pub not_found: Vec<ScanOutcome>,
    /// Set when the batch stopped early. Outcomes gathered before the
    /// failure stay committed.
    pub error: Option<E>,
}

impl<E> BatchReport<E> {
    pub fn new() -> Self {
        Self {
            success: Vec::new(),
            already_registered: Vec::new(),
            not_found: Vec::new(),
            error: None,
        }
    }

    pub fn push(&mut self, outcome: ScanOutcome) {
        match outcome.kind() {
            OutcomeKind::Success => self.success.push(outcome),
            OutcomeKind::AlreadyRegistered => self.already_registered.push(outcome),
            OutcomeKind::NotFound => self.not_found.push(outcome),
        }
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        match kind {
            OutcomeKind::Success => self.success.len(),
            OutcomeKind::AlreadyRegistered => self.already_registered.len(),
            OutcomeKind::NotFound => self.not_found.len(),
        }
    }

    pub fn attempted(&self) -> usize {
        self.success.len() + self.already_registered.len() + self.not_found.len()
    }
}
