// ── Submission & Poll ──
//
// One create call (no retry), then bounded exponential polling of the
// connection's lifecycle state. Polling stops on AVAILABLE, on any
// non-transient state, at the overall deadline, or when cancelled.
// Nothing is rolled back on failure.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{ConnectionRequest, ConnectionResult, ConnectionStatus};
use crate::provider::CloudProvider;

/// Backoff schedule for lifecycle polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub factor: u32,
    pub max_delay: Duration,
    /// Overall budget measured from the first sleep.
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(5),
            factor: 2,
            max_delay: Duration::from_secs(30),
            timeout: Duration::from_secs(300),
        }
    }
}

impl PollPolicy {
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(self.factor).min(self.max_delay)
    }
}

/// Submit the create request once. Errors propagate unchanged.
pub async fn submit(
    provider: &dyn CloudProvider,
    request: &ConnectionRequest,
) -> Result<ConnectionStatus, CoreError> {
    info!(name = %request.display_name, "requesting IPSec connection");
    let status = provider.create_connection(request).await?;
    debug!(id = %status.id, state = %status.state, "IPSec connection accepted");
    Ok(status)
}

/// Poll until the connection is AVAILABLE.
pub async fn wait_until_available(
    provider: &dyn CloudProvider,
    id: &str,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<ConnectionStatus, CoreError> {
    let deadline = Instant::now() + policy.timeout;
    let mut delay = policy.initial_delay;
    let mut last_state = String::from("PROVISIONING");

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            warn!(%id, state = %last_state, "gave up waiting for IPSec connection");
            return Err(CoreError::PollTimeout {
                id: id.to_owned(),
                state: last_state,
                timeout_secs: policy.timeout.as_secs(),
            });
        }

        tokio::select! {
            () = cancel.cancelled() => {
                return Err(CoreError::Cancelled { id: id.to_owned() });
            }
            () = sleep(delay.min(remaining)) => {}
        }

        let status = provider.get_connection(id).await?;
        debug!(%id, state = %status.state, "polled IPSec connection");

        if status.state.is_available() {
            return Ok(status);
        }
        if !status.state.is_transient() {
            warn!(%id, state = %status.state, "IPSec connection did not become available");
            return Err(CoreError::NotAvailable {
                id: id.to_owned(),
                state: status.state.to_string(),
            });
        }

        last_state = status.state.to_string();
        delay = policy.next_delay(delay);
    }
}

/// Submit, wait for AVAILABLE, then collect the tunnel endpoints.
pub async fn provision(
    provider: &dyn CloudProvider,
    request: &ConnectionRequest,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<ConnectionResult, CoreError> {
    let created = submit(provider, request).await?;
    let status = if created.state.is_available() {
        created
    } else {
        wait_until_available(provider, &created.id, policy, cancel).await?
    };

    let tunnels = provider.list_tunnels(&status.id).await?;
    info!(id = %status.id, tunnels = tunnels.len(), "IPSec connection available");

    Ok(ConnectionResult {
        id: status.id,
        state: status.state,
        tunnels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{SharedSecret, build_request};
    use crate::model::{IkeVersion, LifecycleState, TunnelEndpoint};
    use crate::resolve::{ProvisioningIntent, RoutingPlan};
    use crate::testing::{CONNECTION_ID, FakeProvider};

    fn request() -> ConnectionRequest {
        let intent = ProvisioningIntent {
            name: "test-vpn".into(),
            compartment_id: "c1".into(),
            drg_id: "drg1".into(),
            cpe_id: "cpe1".into(),
            cpe_ip: None,
            ike_version: IkeVersion::V2,
            plan: RoutingPlan::Static,
            remote_routes: vec!["1.2.3.4/32".into()],
            warnings: Vec::new(),
        };
        build_request(&intent, &SharedSecret::new("secret"))
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = PollPolicy::default();
        let mut delay = policy.initial_delay;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(delay.as_secs());
            delay = policy.next_delay(delay);
        }
        assert_eq!(seen, [5, 10, 20, 30, 30]);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_available() {
        let provider = FakeProvider::with_states([
            LifecycleState::Provisioning,
            LifecycleState::Provisioning,
            LifecycleState::Available,
        ]);
        let start = Instant::now();

        let status = wait_until_available(
            &provider,
            CONNECTION_ID,
            &PollPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .expect("available");

        assert_eq!(status.state, LifecycleState::Available);
        assert_eq!(provider.call_count("get_connection"), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(5 + 10 + 20));
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_state_stops_polling() {
        let provider =
            FakeProvider::with_states([LifecycleState::Provisioning, LifecycleState::Failed]);

        let err = wait_until_available(
            &provider,
            CONNECTION_ID,
            &PollPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .expect_err("failed");

        assert!(matches!(err, CoreError::NotAvailable { ref state, .. } if state == "FAILED"));
        assert_eq!(provider.call_count("get_connection"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_state_is_not_available() {
        let provider = FakeProvider::with_states([LifecycleState::Unknown("UPDATING".into())]);
        let err = wait_until_available(
            &provider,
            CONNECTION_ID,
            &PollPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .expect_err("unknown");
        assert!(matches!(err, CoreError::NotAvailable { ref state, .. } if state == "UPDATING"));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_at_the_deadline() {
        let provider = FakeProvider::with_states([LifecycleState::Provisioning]);
        let policy = PollPolicy::default().with_timeout(Duration::from_secs(60));
        let start = Instant::now();

        let err = wait_until_available(&provider, CONNECTION_ID, &policy, &CancellationToken::new())
            .await
            .expect_err("timeout");

        assert!(matches!(
            err,
            CoreError::PollTimeout {
                timeout_secs: 60,
                ..
            }
        ));
        // 5, 15, 35, then the last sleep is clipped to the deadline.
        assert_eq!(provider.call_count("get_connection"), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_the_wait() {
        let provider = FakeProvider::with_states([LifecycleState::Provisioning]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = wait_until_available(&provider, CONNECTION_ID, &PollPolicy::default(), &cancel)
            .await
            .expect_err("cancelled");

        assert!(matches!(err, CoreError::Cancelled { .. }));
        assert_eq!(provider.call_count("get_connection"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn submission_errors_are_not_retried() {
        let provider = FakeProvider {
            fail_create: true,
            ..FakeProvider::default()
        };

        let err = provision(
            &provider,
            &request(),
            &PollPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .expect_err("create fails");

        assert!(matches!(err, CoreError::Api { .. }));
        assert_eq!(provider.call_count("create_connection"), 1);
        assert_eq!(provider.call_count("get_connection"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn provision_collects_tunnel_endpoints() {
        let provider = FakeProvider {
            tunnels: vec![
                TunnelEndpoint {
                    id: "t1".into(),
                    display_name: Some("T1-test-vpn".into()),
                    endpoint_ip: Some("203.0.113.10".into()),
                },
                TunnelEndpoint {
                    id: "t2".into(),
                    display_name: Some("T2-test-vpn".into()),
                    endpoint_ip: Some("203.0.113.11".into()),
                },
            ],
            ..FakeProvider::with_states([LifecycleState::Available])
        };

        let result = provision(
            &provider,
            &request(),
            &PollPolicy::default(),
            &CancellationToken::new(),
        )
        .await
        .expect("provisioned");

        assert_eq!(result.id, CONNECTION_ID);
        assert_eq!(result.endpoint_for("T2-test-vpn"), Some("203.0.113.11"));
        let created = provider.created.lock().expect("lock").clone().expect("request");
        assert_eq!(created.display_name, "test-vpn");
        assert_eq!(
            provider.calls(),
            vec![
                "create_connection".to_owned(),
                format!("get_connection {CONNECTION_ID}"),
                format!("list_tunnels {CONNECTION_ID}"),
            ]
        );
    }
}
