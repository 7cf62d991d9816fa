//! Outcome normalization: heterogeneous status responses to one [`Outcome`].
//!
//! Completion is recognised from any of three independent signals, checked
//! in this order:
//!
//! 1. a numeric `status` at the kind's completion sentinel (100),
//! 2. a string `status` of `"completed"`,
//! 3. a non-empty result field for the kind, whatever the status says.
//!
//! The third rule exists because the service has been seen to deliver a
//! result while omitting (or contradicting) the status string.
//!
//! A string status of `"failed"` is a terminal failure. Anything else,
//! including responses that cannot be decoded at all, is `Pending`: one
//! malformed intermediate response must not fail a job that may still
//! complete.

use serde_json::Value;

use crate::kind::JobKind;
use crate::outcome::{Outcome, Progress};
use crate::status::{RawStatus, StatusField, StatusShape};

/// Message used when the service reports failure without saying why.
pub const GENERIC_FAILURE: &str = "job failed without a reason from the service";

/// Map a raw status response for a job of `kind` to its canonical outcome.
///
/// Pure and infallible.
pub fn normalize(raw: &Value, kind: JobKind) -> Outcome {
    let sentinel = kind.completion_sentinel();
    match RawStatus::decode(kind, raw) {
        Ok(RawStatus::Content(s)) => classify(s, sentinel),
        Ok(RawStatus::VoiceClone(s)) => classify(s, sentinel),
        Ok(RawStatus::ShortVideo(s)) => classify(s, sentinel),
        Ok(RawStatus::SpeakerSeparation(s)) => classify(s, sentinel),
        Err(_) => Outcome::pending(),
    }
}

fn classify<S: StatusShape>(shape: S, sentinel: u8) -> Outcome {
    let progress = shape
        .status()
        .and_then(StatusField::percent)
        .map(Progress::from_raw);

    let completed = progress.is_some_and(|p| p.percent() >= sentinel)
        || shape.status().is_some_and(|s| s.is_label("completed"))
        || shape.has_result();
    if completed {
        return Outcome::Completed {
            payload: shape.into_payload(),
        };
    }

    if shape.status().is_some_and(|s| s.is_label("failed")) {
        let reason = shape.error_message().unwrap_or(GENERIC_FAILURE).to_string();
        return Outcome::Failed { reason };
    }

    Outcome::Pending { progress }
}
