//! In-memory TTL cache
//!
//! Entries carry an absolute expiry computed from an injected [`Clock`] and
//! are removed lazily when read after they expire. There is no capacity bound
//! and no background sweep.

mod cache;
mod clock;
mod types;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use types::{CacheEntry, CacheStats};
