//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Builds a unique token string for api tokens and session tokens.
///
/// # Arguments
/// - `prefix` - Human readable prefix identifying the token's owner kind
///
/// # Returns
/// - `String` - Token that is unique within the test process
pub fn unique_token(prefix: &str) -> String {
    format!("{prefix}_token_{}", next_id())
}
