//! Labeled transcripts and per-example ratings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ResolveError;

/// One user/assistant exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transcript {
    pub user_input: String,
    pub assistant_response: String,
}

/// A transcript together with the labels assigned by each labeler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptWithLabels {
    pub data_hash: String,
    pub data: Transcript,

    /// Labeler name → label.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// Convert a single label into a rating in `[0, 1]`.
///
/// Numeric labels must already lie in that range; the common verdict words
/// map to 1 (harmful) or 0 (harmless).
pub fn label_rating(data_hash: &str, label: &str) -> Result<f64, ResolveError> {
    let trimmed = label.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        if (0.0..=1.0).contains(&n) {
            return Ok(n);
        }
        return Err(ResolveError::UnknownLabel {
            data_hash: data_hash.to_string(),
            label: label.to_string(),
        });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "harmful" | "unsafe" | "yes" | "y" => Ok(1.0),
        "harmless" | "safe" | "no" | "n" => Ok(0.0),
        _ => Err(ResolveError::UnknownLabel {
            data_hash: data_hash.to_string(),
            label: label.to_string(),
        }),
    }
}

/// Mean rating over every labeler of a transcript.
///
/// Returns `Ok(None)` for unlabeled transcripts.
pub fn avg_rating(transcript: &TranscriptWithLabels) -> Result<Option<f64>, ResolveError> {
    if transcript.labels.is_empty() {
        return Ok(None);
    }

    let mut sum = 0.0;
    for label in transcript.labels.values() {
        sum += label_rating(&transcript.data_hash, label)?;
    }
    Ok(Some(sum / transcript.labels.len() as f64))
}
