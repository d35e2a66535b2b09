use std::future::Future;

use thiserror::Error;

/// Which authentication methods an evaluation may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// A strong biometric method only.
    Biometrics,
    /// Biometrics or the device passcode.
    AnyMethod,
}

impl std::fmt::Display for AuthPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthPolicy::Biometrics => write!(f, "biometrics"),
            AuthPolicy::AnyMethod => write!(f, "any-method"),
        }
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    /// Carries the platform's localized message, when it supplied one.
    Failure(Option<String>),
}

/// The platform cannot evaluate the requested policy on this device.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("authentication policy {policy} unavailable: {}", .message.as_deref().unwrap_or("no description available"))]
pub struct CapabilityError {
    pub policy: AuthPolicy,
    pub message: Option<String>,
}

/// Platform authentication, consumed by [`crate::AuthenticationGate`].
///
/// `evaluate` may complete on any thread; the gate only applies the outcome
/// after it has been handed back to the gate's owner.
pub trait AuthCapability: Send + Sync + 'static {
    /// Synchronous availability check for `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] when the policy cannot be evaluated.
    fn can_evaluate(&self, policy: AuthPolicy) -> Result<(), CapabilityError>;

    /// Prompts the user under `policy`, showing `reason`.
    fn evaluate(&self, policy: AuthPolicy, reason: &str)
        -> impl Future<Output = AuthOutcome> + Send;
}
