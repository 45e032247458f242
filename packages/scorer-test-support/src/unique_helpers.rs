//! Process-unique identifiers so tests sharing a store never collide.

use std::sync::atomic::{AtomicI64, Ordering};

static NEXT: AtomicI64 = AtomicI64::new(1_000);

/// A fresh positive id.
///
/// ```
/// use scorer_test_support::unique_helpers::unique_id;
///
/// assert_ne!(unique_id(), unique_id());
/// ```
pub fn unique_id() -> i64 {
    NEXT.fetch_add(1, Ordering::Relaxed)
}
