use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::capability::{AuthCapability, AuthOutcome, AuthPolicy};

/// Justification shown by the platform prompt.
pub const AUTH_REASON: &str = "Please authenticate yourself to unlock your places.";

/// Failure message when the device has no authentication method at all.
pub const NO_METHOD_MESSAGE: &str =
    "No biometric or passcode authentication is configured on this device.";

/// Published state of the gate. Starts `Locked`; `Unlocked` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthenticationState {
    #[default]
    Locked,
    Unlocked,
    /// Recoverable failure with a human-readable reason (may be empty).
    Failed(String),
}

/// The caller's answer to a `Failed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Try again with any available method (never biometrics alone).
    Retry,
    /// Go back to `Locked` without trying again.
    Cancel,
}

/// State machine gating access to the saved places.
///
/// Every evaluation runs as its own task, off the owner's context; its
/// outcome is awaited back here and only then applied, so transitions are
/// applied by the single `&mut self` owner, one at a time.
pub struct AuthenticationGate<C> {
    capability: Arc<C>,
    state: AuthenticationState,
    state_tx: watch::Sender<AuthenticationState>,
}

impl<C: AuthCapability> AuthenticationGate<C> {
    pub fn new(capability: C) -> Self {
        Self::with_shared(Arc::new(capability))
    }

    pub fn with_shared(capability: Arc<C>) -> Self {
        let (state_tx, _) = watch::channel(AuthenticationState::Locked);
        Self {
            capability,
            state: AuthenticationState::Locked,
            state_tx,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AuthenticationState {
        &self.state
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.state == AuthenticationState::Unlocked
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthenticationState> {
        self.state_tx.subscribe()
    }

    /// Unlocks with biometrics, or falls through to
    /// [`AuthenticationGate::authenticate_with_pin`] when biometrics are
    /// unavailable. Does nothing once unlocked.
    pub async fn authenticate(&mut self) {
        if self.is_unlocked() {
            debug!("authenticate ignored: already unlocked");
            return;
        }
        match self.capability.can_evaluate(AuthPolicy::Biometrics) {
            Ok(()) => self.evaluate(AuthPolicy::Biometrics).await,
            Err(e) => {
                debug!(error = %e, "biometrics unavailable; falling back to passcode");
                self.authenticate_with_pin().await;
            }
        }
    }

    /// Unlocks with any configured method. When the device has none, moves to
    /// `Failed` with [`NO_METHOD_MESSAGE`] and does not retry.
    pub async fn authenticate_with_pin(&mut self) {
        if self.is_unlocked() {
            debug!("authenticate_with_pin ignored: already unlocked");
            return;
        }
        match self.capability.can_evaluate(AuthPolicy::AnyMethod) {
            Ok(()) => self.evaluate(AuthPolicy::AnyMethod).await,
            Err(e) => {
                warn!(error = %e, "no authentication method available");
                self.transition(AuthenticationState::Failed(NO_METHOD_MESSAGE.to_string()));
            }
        }
    }

    /// Applies the caller's choice from a `Failed` state; ignored otherwise.
    pub async fn respond(&mut self, action: FailureAction) {
        if !matches!(self.state, AuthenticationState::Failed(_)) {
            debug!(?action, state = ?self.state, "failure action ignored outside Failed state");
            return;
        }
        match action {
            FailureAction::Retry => self.authenticate_with_pin().await,
            FailureAction::Cancel => self.transition(AuthenticationState::Locked),
        }
    }

    async fn evaluate(&mut self, policy: AuthPolicy) {
        let capability = Arc::clone(&self.capability);
        let evaluation =
            tokio::spawn(async move { capability.evaluate(policy, AUTH_REASON).await });

        let outcome = match evaluation.await {
            Ok(outcome) => outcome,
            Err(e) => AuthOutcome::Failure(Some(format!("authentication was interrupted: {e}"))),
        };

        match outcome {
            AuthOutcome::Success => {
                info!(%policy, "authentication succeeded");
                self.transition(AuthenticationState::Unlocked);
            }
            AuthOutcome::Failure(message) => {
                let reason = message.unwrap_or_default();
                info!(%policy, %reason, "authentication failed");
                self.transition(AuthenticationState::Failed(reason));
            }
        }
    }

    fn transition(&mut self, next: AuthenticationState) {
        debug!(from = ?self.state, to = ?next, "authentication state change");
        self.state = next.clone();
        self.state_tx.send_replace(next);
    }
}
