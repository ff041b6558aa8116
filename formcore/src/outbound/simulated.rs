//! Simulated registration backend.
//!
//! Stands in for a real network client behind
//! [`RegistrationGateway`]: every call waits a fixed delay, then draws a
//! uniform random outcome. The defaults model a 2500 ms round trip failing
//! half the time; both knobs are configurable so tests can pin the coin or
//! shrink the wait.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::debug;

use crate::domain::ports::{GatewayError, RegistrationGateway};
use crate::domain::user::{RegistrationReceipt, UserRecord};

/// Round-trip delay applied to every simulated call, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 2500;
/// Probability that a simulated call fails with a network timeout.
pub const DEFAULT_FAILURE_PROBABILITY: f64 = 0.5;

/// Tunables for [`SimulatedGateway`].
///
/// `Default` yields the stock stub behaviour; hosts can deserialise
/// overrides from whatever configuration layer they use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SimulatedGatewayConfig {
    /// Fixed round-trip delay in milliseconds.
    pub delay_ms: u64,
    /// Probability in `[0.0, 1.0]` that a call fails; values outside the
    /// range are clamped.
    pub failure_probability: f64,
}

impl Default for SimulatedGatewayConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            failure_probability: DEFAULT_FAILURE_PROBABILITY,
        }
    }
}

/// Fixed-delay, randomly failing stand-in for a registration backend.
pub struct SimulatedGateway {
    delay: Duration,
    failure_probability: f64,
    rng: Mutex<SmallRng>,
}

impl SimulatedGateway {
    /// Gateway with the stock delay and failure rate and an entropy-seeded
    /// generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(SimulatedGatewayConfig::default())
    }

    /// Gateway with the given tunables and an entropy-seeded generator.
    #[must_use]
    pub fn from_config(config: SimulatedGatewayConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Gateway with the given tunables and a caller-supplied generator, for
    /// deterministic tests.
    #[must_use]
    pub fn with_rng(config: SimulatedGatewayConfig, rng: SmallRng) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            failure_probability: config.failure_probability.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    fn draw_failure(&self) -> bool {
        self.rng_guard().gen_bool(self.failure_probability)
    }

    // The generator has no cross-call invariants, so a poisoned lock can
    // simply be taken over.
    fn rng_guard(&self) -> MutexGuard<'_, SmallRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationGateway for SimulatedGateway {
    async fn create_user(&self, record: &UserRecord) -> Result<RegistrationReceipt, GatewayError> {
        sleep(self.delay).await;

        if self.draw_failure() {
            return Err(GatewayError::NetworkTimeout);
        }

        debug!(username = %record.username(), "simulated backend accepted registration");
        Ok(RegistrationReceipt::from(record))
    }
}
