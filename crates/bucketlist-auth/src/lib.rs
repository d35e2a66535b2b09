//! Device-authentication gate in front of the saved places.
//!
//! [`AuthenticationGate`] drives a small state machine over a platform
//! [`AuthCapability`]: biometrics first, then any configured method, with an
//! explicit retry/cancel choice after a failure.

pub mod capability;
pub mod gate;

pub use capability::{AuthCapability, AuthOutcome, AuthPolicy, CapabilityError};
pub use gate::{AuthenticationGate, AuthenticationState, FailureAction, AUTH_REASON, NO_METHOD_MESSAGE};
