//! Statistical sanity check on the simulated gateway's failure rate.
//!
//! Not a hard assertion on randomness: the band is generous and the
//! generator is seeded, so the run is reproducible.

use formcore::domain::ports::RegistrationGateway;
use formcore::outbound::simulated::{SimulatedGateway, SimulatedGatewayConfig};
use formcore::{FieldName, RegistrationForm};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const RUNS: u32 = 1000;

#[tokio::test(start_paused = true)]
async fn failure_rate_is_consistent_with_one_half() {
    let gateway = SimulatedGateway::with_rng(
        SimulatedGatewayConfig::default(),
        SmallRng::seed_from_u64(0xC0FFEE),
    );

    let mut form = RegistrationForm::new();
    form.set_value(FieldName::Username, "ada");
    form.set_value(FieldName::Email, "ada@example.com");
    form.set_value(FieldName::AccountType, "admin");
    form.set_value(FieldName::Password, "Passw0rd!");
    let record = form.draft().expect("valid form yields a record");

    let mut failures = 0_u32;
    for _ in 0..RUNS {
        if gateway.create_user(&record).await.is_err() {
            failures += 1;
        }
    }

    // With p = 0.5 and n = 1000 the standard deviation is ~15.8; a ±100
    // band is over six sigma, so a healthy generator never trips this.
    assert!(
        (400..=600).contains(&failures),
        "observed {failures} failures in {RUNS} runs"
    );
}
