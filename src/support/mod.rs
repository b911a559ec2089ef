//! Support record normalizer
//!
//! Raw `support` values are polymorphic: a single record object, an ordered
//! list of records, or a bare sentinel. This module turns them into an
//! ordered `Vec<SupportRecord>` with typed `VersionToken`s.

mod errors;
mod normalize;
mod record;
mod token;

pub use errors::{SupportError, SupportResult};
pub use normalize::normalize;
pub use record::{FeatureSupportMap, SupportRecord};
pub use token::{VersionToken, RANGED_PREFIX};
