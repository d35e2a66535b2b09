//! Terminal stand-in for the platform authentication capability.
//!
//! Terminals have no biometrics. The "any method" policy is a passcode read
//! from stdin and compared in constant time against `BUCKETLIST_PASSCODE`.

use std::future::Future;
use std::io::{self, BufRead, Write};

use bucketlist_auth::{
    AuthCapability, AuthOutcome, AuthPolicy, AuthenticationGate, AuthenticationState,
    CapabilityError, FailureAction,
};
use subtle::ConstantTimeEq;

pub(crate) struct TerminalPasscode {
    expected: Option<String>,
}

impl TerminalPasscode {
    pub(crate) fn new(expected: Option<String>) -> Self {
        Self { expected }
    }
}

impl AuthCapability for TerminalPasscode {
    fn can_evaluate(&self, policy: AuthPolicy) -> Result<(), CapabilityError> {
        match policy {
            AuthPolicy::Biometrics => Err(CapabilityError {
                policy,
                message: Some("biometric authentication is not available in a terminal".into()),
            }),
            AuthPolicy::AnyMethod if self.expected.is_some() => Ok(()),
            AuthPolicy::AnyMethod => Err(CapabilityError {
                policy,
                message: Some("no passcode configured (set BUCKETLIST_PASSCODE)".into()),
            }),
        }
    }

    fn evaluate(
        &self,
        _policy: AuthPolicy,
        reason: &str,
    ) -> impl Future<Output = AuthOutcome> + Send {
        let expected = self.expected.clone();
        let prompt = format!("{reason}\nPasscode: ");
        async move {
            let Some(expected) = expected else {
                return AuthOutcome::Failure(Some("No passcode is configured.".to_string()));
            };
            match tokio::task::spawn_blocking(move || prompt_line(&prompt)).await {
                Ok(Ok(entered)) if passcodes_match(&entered, &expected) => AuthOutcome::Success,
                Ok(Ok(_)) => AuthOutcome::Failure(Some("Incorrect passcode.".to_string())),
                Ok(Err(e)) => AuthOutcome::Failure(Some(format!("Could not read passcode: {e}"))),
                Err(e) => AuthOutcome::Failure(Some(format!("Passcode prompt failed: {e}"))),
            }
        }
    }
}

fn passcodes_match(entered: &str, expected: &str) -> bool {
    entered.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn parse_failure_answer(answer: &str) -> FailureAction {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "r" | "retry" => FailureAction::Retry,
        _ => FailureAction::Cancel,
    }
}

/// Runs the gate until it is unlocked (`true`) or the user cancels (`false`).
pub(crate) async fn unlock(expected: Option<String>) -> anyhow::Result<bool> {
    let gate = AuthenticationGate::new(TerminalPasscode::new(expected));
    drive_gate(gate, |prompt| async move {
        Ok::<_, anyhow::Error>(tokio::task::spawn_blocking(move || prompt_line(&prompt)).await??)
    })
    .await
}

async fn drive_gate<C, F, Fut>(mut gate: AuthenticationGate<C>, mut ask: F) -> anyhow::Result<bool>
where
    C: AuthCapability,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = anyhow::Result<String>>,
{
    gate.authenticate().await;

    loop {
        match gate.state() {
            AuthenticationState::Unlocked => {
                tracing::info!("places unlocked");
                return Ok(true);
            }
            AuthenticationState::Locked => return Ok(false),
            AuthenticationState::Failed(reason) => {
                tracing::warn!(%reason, "authentication failed");
                let prompt = if reason.is_empty() {
                    "Authentication failed. Retry? [y/N] ".to_string()
                } else {
                    format!("Authentication failed: {reason}\nRetry? [y/N] ")
                };
                let action = parse_failure_answer(&ask(prompt).await?);
                tracing::debug!(?action, "failure answered");
                gate.respond(action).await;
            }
        }
    }
}
