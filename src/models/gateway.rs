use std::time::Duration;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Hand back `value` once `delay` has elapsed. Never fails, never times out.
pub async fn simulate<T>(value: T, delay: Duration) -> T {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    value
}
