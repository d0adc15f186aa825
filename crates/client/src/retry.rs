use tracing::warn;
use vau_tunnel_common::{Result, VauError};

use crate::transport::TransportError;

/// Run an outer HTTP call up to `max_attempts` times.
///
/// Only transient transport failures are retried; callers map
/// application-level failures (integrity, malformed frames) before or
/// after this helper so they surface immediately. On exhaustion the
/// last failure and the attempt count are reported together.
pub fn with_retry<T, F>(max_attempts: usize, mut op: F) -> Result<T>
where
    F: FnMut() -> std::result::Result<T, TransportError>,
{
    let attempts = max_attempts.max(1);
    let mut last = String::new();

    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!("Outer call attempt {attempt}/{attempts} failed: {err}");
                last = err.to_string();
            }
        }
    }

    Err(VauError::AttemptsExhausted { attempts, last })
}
