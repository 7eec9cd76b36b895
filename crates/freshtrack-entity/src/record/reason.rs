//! Reason tags for return records.

/// Reason stored on records created by the record generation policy.
///
/// Sync-on-update matches on this exact value, so it must never change for
/// existing data. The `auto:` prefix keeps it apart from free-text reasons.
pub const AUTO_RECORD_REASON: &str = "auto:expiring";

/// Whether a reason string marks an automatically generated record.
pub fn is_auto_generated(reason: &str) -> bool {
    reason == AUTO_RECORD_REASON
}
