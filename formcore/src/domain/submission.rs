//! Submission workflow.
//!
//! Orchestrates one submit request end to end: validate, lock the form,
//! drive the gateway, then publish exactly one notification and restore the
//! form. Gateway failures are converted to the error banner here at the
//! boundary; nothing below this layer talks to the notification channel.

use std::sync::Arc;

use notifications::{MessageChannel, Notification};
use tracing::{debug, warn};

use crate::domain::form::RegistrationForm;
use crate::domain::ports::{GatewayError, RegistrationGateway};
use crate::domain::user::RegistrationReceipt;

/// Banner published after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";
/// Prefix prepended to a gateway failure before it reaches the banner.
pub const ERROR_MESSAGE_PREFIX: &str = "An unexpected error occurred!";

/// Phases of the submission state machine.
///
/// Every accepted or rejected submit ends back at [`SubmissionPhase::Idle`];
/// the intermediate phases are observable only while a submit is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// No submit in progress.
    #[default]
    Idle,
    /// Checking form validity.
    Validating,
    /// Waiting on the gateway.
    Submitting,
    /// Gateway accepted; wrap-up in progress.
    Succeeded,
    /// Gateway failed; wrap-up in progress.
    Failed,
}

/// Terminal result of one submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The form failed validation; nothing was sent or published.
    Rejected,
    /// The gateway accepted the record; the form was reset.
    Succeeded(RegistrationReceipt),
    /// The gateway failed; the form keeps its values for another attempt.
    Failed(GatewayError),
}

/// Drives submit requests against a [`RegistrationGateway`].
///
/// One workflow serves one form at a time: the form lock prevents re-entrant
/// submission while a request is in flight, and there is no cancellation —
/// an accepted submit always runs to completion.
#[derive(Debug, Clone)]
pub struct SubmissionWorkflow<G> {
    gateway: Arc<G>,
    messages: MessageChannel,
    loading: bool,
    phase: SubmissionPhase,
}

impl<G> SubmissionWorkflow<G> {
    /// Build a workflow over `gateway`, publishing to `messages`.
    pub const fn new(gateway: Arc<G>, messages: MessageChannel) -> Self {
        Self {
            gateway,
            messages,
            loading: false,
            phase: SubmissionPhase::Idle,
        }
    }

    /// Whether a gateway call is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current phase of the state machine.
    #[must_use]
    pub const fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Channel this workflow publishes to.
    #[must_use]
    pub const fn messages(&self) -> &MessageChannel {
        &self.messages
    }
}

impl<G> SubmissionWorkflow<G>
where
    G: RegistrationGateway,
{
    /// Run one submit request to completion.
    ///
    /// An invalid form short-circuits with [`SubmissionOutcome::Rejected`]:
    /// no lock, no gateway call, no notification. Otherwise the form stays
    /// locked for the duration of the gateway call and is unlocked again
    /// before the outcome is published, whatever that outcome is.
    pub async fn submit(&mut self, form: &mut RegistrationForm) -> SubmissionOutcome {
        self.phase = SubmissionPhase::Validating;
        let Some(record) = form.draft() else {
            debug!("form failed validation; submission not attempted");
            self.phase = SubmissionPhase::Idle;
            return SubmissionOutcome::Rejected;
        };

        debug!(username = %record.username(), "submitting registration");
        self.phase = SubmissionPhase::Submitting;
        form.lock();
        self.loading = true;

        let result = self.gateway.create_user(&record).await;

        // Cleanup runs before the outcome is published, success or failure
        // alike; the form must be editable again either way.
        self.loading = false;
        form.unlock();

        let outcome = match result {
            Ok(receipt) => {
                self.phase = SubmissionPhase::Succeeded;
                self.messages.publish(Notification::success(SUCCESS_MESSAGE));
                form.reset();
                SubmissionOutcome::Succeeded(receipt)
            }
            Err(error) => {
                self.phase = SubmissionPhase::Failed;
                warn!(error = %error, "registration gateway rejected the submission");
                self.messages.publish(failure_notification(&error));
                SubmissionOutcome::Failed(error)
            }
        };

        self.phase = SubmissionPhase::Idle;
        outcome
    }
}

/// Map a gateway failure to the user-facing error banner.
///
/// A plain result-mapping function at the workflow boundary; every gateway
/// failure becomes exactly one error banner and nothing propagates past it.
#[must_use]
pub fn failure_notification(error: &GatewayError) -> Notification {
    Notification::error(format!("{ERROR_MESSAGE_PREFIX}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::FieldName;
    use crate::domain::ports::MockRegistrationGateway;
    use crate::domain::user::AccountType;
    use notifications::Severity;
    use std::sync::Mutex;

    fn valid_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_value(FieldName::Username, "ada");
        form.set_value(FieldName::Email, "ada@example.com");
        form.set_value(FieldName::AccountType, "admin");
        form.set_value(FieldName::Password, "Passw0rd!");
        form
    }

    fn workflow_with(
        gateway: MockRegistrationGateway,
    ) -> (SubmissionWorkflow<MockRegistrationGateway>, MessageChannel) {
        let channel = MessageChannel::new();
        (
            SubmissionWorkflow::new(Arc::new(gateway), channel.clone()),
            channel,
        )
    }

    #[tokio::test]
    async fn success_publishes_banner_and_resets_form() {
        let mut gateway = MockRegistrationGateway::new();
        gateway
            .expect_create_user()
            .times(1)
            .returning(|record| Ok(RegistrationReceipt::from(record)));

        let (mut workflow, channel) = workflow_with(gateway);
        let mut form = valid_form();

        let outcome = workflow.submit(&mut form).await;

        let receipt = match outcome {
            SubmissionOutcome::Succeeded(receipt) => receipt,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(receipt.username, "ada");
        assert_eq!(receipt.account_type, AccountType::Admin);

        let banner = channel.current().expect("success banner published");
        assert_eq!(banner.message(), SUCCESS_MESSAGE);
        assert_eq!(banner.severity(), Severity::Success);

        assert!(!form.is_locked());
        assert!(!workflow.is_loading());
        assert_eq!(workflow.phase(), SubmissionPhase::Idle);
        assert_eq!(form.field(FieldName::Username).value(), "");
    }

    #[tokio::test]
    async fn failure_publishes_prefixed_banner_and_keeps_values() {
        let mut gateway = MockRegistrationGateway::new();
        gateway
            .expect_create_user()
            .times(1)
            .returning(|_| Err(GatewayError::NetworkTimeout));

        let (mut workflow, channel) = workflow_with(gateway);
        let mut form = valid_form();

        let outcome = workflow.submit(&mut form).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Failed(GatewayError::NetworkTimeout)
        );

        let banner = channel.current().expect("error banner published");
        assert_eq!(
            banner.message(),
            "An unexpected error occurred!: Network timeout!"
        );
        assert_eq!(banner.severity(), Severity::Error);

        assert!(!form.is_locked());
        assert!(!workflow.is_loading());
        assert_eq!(form.field(FieldName::Username).value(), "ada");
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_without_side_effects() {
        let mut gateway = MockRegistrationGateway::new();
        gateway.expect_create_user().times(0);

        let (mut workflow, channel) = workflow_with(gateway);
        let deliveries = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&deliveries);
        let _sub = channel.subscribe(move |value| {
            sink.lock()
                .expect("recorder poisoned")
                .push(value.cloned());
        });

        let mut form = RegistrationForm::new();
        let outcome = workflow.submit(&mut form).await;

        assert_eq!(outcome, SubmissionOutcome::Rejected);
        assert!(!form.is_locked());
        assert_eq!(channel.current(), None);

        let log = deliveries.lock().expect("recorder poisoned");
        assert_eq!(
            log.as_slice(),
            [None::<Notification>],
            "only the subscribe-time callback"
        );
    }

    #[tokio::test]
    async fn exactly_one_notification_per_accepted_submit() {
        let mut gateway = MockRegistrationGateway::new();
        gateway
            .expect_create_user()
            .times(1)
            .returning(|record| Ok(RegistrationReceipt::from(record)));

        let (mut workflow, channel) = workflow_with(gateway);
        let publishes = Arc::new(Mutex::new(0_u32));
        let counter = Arc::clone(&publishes);
        let _sub = channel.subscribe(move |value| {
            if value.is_some() {
                *counter.lock().expect("counter poisoned") += 1;
            }
        });

        let mut form = valid_form();
        workflow.submit(&mut form).await;

        assert_eq!(*publishes.lock().expect("counter poisoned"), 1);
    }

    #[rstest::rstest]
    fn failure_notification_concatenates_prefix_and_description() {
        let notification = failure_notification(&GatewayError::NetworkTimeout);
        assert_eq!(
            notification.message(),
            "An unexpected error occurred!: Network timeout!"
        );
        assert_eq!(notification.severity(), Severity::Error);
    }
}
