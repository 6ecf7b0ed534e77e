// system-tests/src/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probes for the stub service.
// Purpose: Ensure the service answers before suites run, without arbitrary sleeps.
// Dependencies: qualreg-scenarios, tokio
// ============================================================================

//! ## Overview
//! Readiness polling for the stub service: probe the service root until it
//! answers (or a deadline elapses) so each test binary can start the suite
//! without arbitrary sleeps.

use std::time::Duration;
use std::time::Instant;

use qualreg_scenarios::client::ApiClient;
use tokio::time::sleep;

/// Polls the health endpoint until it answers 200 or the timeout expires.
///
/// # Errors
///
/// Returns an error naming the attempt count when the timeout expires.
pub async fn wait_until_ready(client: &ApiClient, timeout: Duration) -> Result<(), String> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match client.get("/health").await {
            Ok(response) if response.status == 200 => return Ok(()),
            Ok(_) | Err(_) if start.elapsed() > timeout => {
                return Err(format!("service readiness timeout after {attempts} attempts"));
            }
            Ok(_) | Err(_) => sleep(Duration::from_millis(25)).await,
        }
    }
}
