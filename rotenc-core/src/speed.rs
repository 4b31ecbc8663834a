//! Rotational speed estimation
//!
//! ```text
//! average interval = elapsed / triggers
//! rpm              = round(60000 / (average interval × detents))
//!                  = round(60000 × triggers / (elapsed × detents))
//! ```
//!
//! The second form is used so the per-edge interval is never truncated to
//! whole milliseconds and no float rounding is needed.

const MS_PER_MINUTE: u64 = 60_000;

/// Estimate revolutions per minute from a drained rotation sample
///
/// - `triggers`: confirmed edges in the sample
/// - `elapsed_ms`: time since the previous drain, or `None` if the clock
///   has not advanced
/// - `fallback_interval_ms`: per-edge interval assumed when `elapsed_ms`
///   is `None`
///
/// Returns 0 for an empty sample or a zero detent count.
pub fn estimate_rpm(
    triggers: u16,
    elapsed_ms: Option<u64>,
    detents_per_revolution: u16,
    fallback_interval_ms: u32,
) -> i32 {
    if triggers == 0 || detents_per_revolution == 0 {
        return 0;
    }

    let triggers = triggers as u64;
    let span_ms = match elapsed_ms {
        Some(elapsed) if elapsed > 0 => elapsed,
        _ => (fallback_interval_ms.max(1) as u64) * triggers,
    };

    let numerator = MS_PER_MINUTE * triggers;
    let denominator = span_ms.saturating_mul(detents_per_revolution as u64);
    let rpm = (numerator + denominator / 2) / denominator;

    rpm.min(i32::MAX as u64) as i32
}

/// Elapsed milliseconds between two clock readings, if the clock advanced
pub fn elapsed_since(last_ms: u64, now_ms: u64) -> Option<u64> {
    now_ms.checked_sub(last_ms).filter(|&elapsed| elapsed > 0)
}
