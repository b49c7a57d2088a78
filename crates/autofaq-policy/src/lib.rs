//! Decision policy for the AutoFAQ engine.
//!
//! Two concerns live here: the adaptive confidence threshold that
//! decides whether a classified answer is trustworthy enough to send,
//! and the outcome types the engine hands back for every message,
//! curation command, and entry creation. Keeping them in one crate
//! lets both the engine and its frontends speak the same vocabulary
//! without pulling in the classifiers.

pub mod decision;
pub mod threshold;

pub use decision::{CheckOutcome, CreateOutcome, CreateRejection, CurationOutcome, Prediction};
pub use threshold::{ThresholdPolicy, DEFAULT_MAX_THRESHOLD, DEFAULT_MIN_THRESHOLD};
