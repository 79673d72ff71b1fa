//! Admission-time resource-quota checking.
//!
//! Decides, before a namespace write is persisted, whether the sum of quotas
//! committed to all namespaces of a project stays within the project's cap.
//! Enforcement of quotas at runtime lives elsewhere; this crate only answers
//! "does this candidate quota fit?".

pub mod admission;
pub mod error;
pub mod fit;

pub use admission::{Operation, QuotaReads, validate_namespace_quota};
pub use error::{AdmissionError, QUOTA_FIELD};
pub use fit::is_quota_fit;
