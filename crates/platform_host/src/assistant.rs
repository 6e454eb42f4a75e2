//! Generative-assistant host-service contracts and the credential failover policy.
//!
//! The transport performs exactly one outbound request per call. [`request_with_failover`]
//! walks a fixed credential list, trying each key once in order, and only surfaces an error
//! after every key has failed.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Object-safe boxed future used by [`AssistantTransport`].
pub type AssistantFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Prompt sent to the assistant backend.
pub struct AssistantRequest {
    /// Backend model name.
    pub model: String,
    /// Optional system instruction.
    #[serde(default)]
    pub system_instruction: Option<String>,
    /// User prompt text.
    pub prompt: String,
}

impl AssistantRequest {
    /// Creates a request without a system instruction.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Successful backend response.
pub struct AssistantReply {
    /// Generated text.
    pub text: String,
    /// Index into the credential list of the key that served the request.
    pub credential_index: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by [`request_with_failover`].
pub enum AssistantError {
    /// The host reports no network connectivity; no request was attempted.
    #[error("assistant unavailable: no network connection")]
    Offline,
    /// The credential list is empty.
    #[error("assistant unavailable: no API credentials configured")]
    NoCredentials,
    /// Every credential was tried once and each request failed.
    #[error("assistant request failed with all {attempts} credentials: {last_error}")]
    Exhausted {
        /// Number of credentials tried.
        attempts: usize,
        /// Error message from the final attempt.
        last_error: String,
    },
}

/// Host service issuing one outbound assistant request with one API key.
pub trait AssistantTransport {
    /// Sends `request` authenticated with `api_key`, returning the generated text.
    fn send<'a>(
        &'a self,
        api_key: &'a str,
        request: &'a AssistantRequest,
    ) -> AssistantFuture<'a, Result<String, String>>;
}

/// Host query for network reachability.
pub trait ConnectivityProbe {
    /// Returns whether the host believes it is online.
    fn is_online(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
/// Probe that always reports connectivity, for hosts without a reachability signal.
pub struct AssumeOnline;

impl ConnectivityProbe for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Transport for unsupported targets; every request fails.
pub struct NoopAssistantTransport;

impl AssistantTransport for NoopAssistantTransport {
    fn send<'a>(
        &'a self,
        _api_key: &'a str,
        _request: &'a AssistantRequest,
    ) -> AssistantFuture<'a, Result<String, String>> {
        Box::pin(async { Err("assistant transport unavailable on this host".to_string()) })
    }
}

/// Sends `request`, rotating through `credentials` on failure.
///
/// # Errors
///
/// Returns [`AssistantError::Offline`] without issuing a request when `probe` reports no
/// connectivity, [`AssistantError::NoCredentials`] for an empty list, and
/// [`AssistantError::Exhausted`] when every credential failed once.
pub async fn request_with_failover<T, P>(
    transport: &T,
    probe: &P,
    credentials: &[String],
    request: &AssistantRequest,
) -> Result<AssistantReply, AssistantError>
where
    T: AssistantTransport + ?Sized,
    P: ConnectivityProbe + ?Sized,
{
    if !probe.is_online() {
        return Err(AssistantError::Offline);
    }
    if credentials.is_empty() {
        return Err(AssistantError::NoCredentials);
    }

    let mut last_error = String::new();
    for (credential_index, api_key) in credentials.iter().enumerate() {
        match transport.send(api_key, request).await {
            Ok(text) => {
                return Ok(AssistantReply {
                    text,
                    credential_index,
                })
            }
            Err(err) => last_error = err,
        }
    }

    Err(AssistantError::Exhausted {
        attempts: credentials.len(),
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;

    struct ScriptedTransport {
        working_key: Option<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(working_key: Option<&'static str>) -> Self {
            Self {
                working_key,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl AssistantTransport for ScriptedTransport {
        fn send<'a>(
            &'a self,
            api_key: &'a str,
            request: &'a AssistantRequest,
        ) -> AssistantFuture<'a, Result<String, String>> {
            Box::pin(async move {
                self.calls.borrow_mut().push(api_key.to_string());
                if Some(api_key) == self.working_key {
                    Ok(format!("echo: {}", request.prompt))
                } else {
                    Err(format!("401 for {api_key}"))
                }
            })
        }
    }

    struct Offline;

    impl ConnectivityProbe for Offline {
        fn is_online(&self) -> bool {
            false
        }
    }

    fn keys() -> Vec<String> {
        vec!["key-a".to_string(), "key-b".to_string(), "key-c".to_string()]
    }

    #[test]
    fn rotates_until_a_credential_succeeds() {
        let transport = ScriptedTransport::new(Some("key-b"));
        let request = AssistantRequest::new("flash", "hello");

        let reply = block_on(request_with_failover(
            &transport,
            &AssumeOnline,
            &keys(),
            &request,
        ))
        .expect("reply");

        assert_eq!(reply.text, "echo: hello");
        assert_eq!(reply.credential_index, 1);
        assert_eq!(*transport.calls.borrow(), vec!["key-a", "key-b"]);
    }

    #[test]
    fn exhausting_every_credential_reports_last_error() {
        let transport = ScriptedTransport::new(None);
        let request = AssistantRequest::new("flash", "hello");

        let err = block_on(request_with_failover(
            &transport,
            &AssumeOnline,
            &keys(),
            &request,
        ))
        .unwrap_err();

        assert_eq!(
            err,
            AssistantError::Exhausted {
                attempts: 3,
                last_error: "401 for key-c".to_string(),
            }
        );
        assert_eq!(transport.calls.borrow().len(), 3);
    }

    #[test]
    fn offline_short_circuits_before_any_request() {
        let transport = ScriptedTransport::new(Some("key-a"));
        let request = AssistantRequest::new("flash", "hello");

        let err = block_on(request_with_failover(&transport, &Offline, &keys(), &request))
            .unwrap_err();

        assert_eq!(err, AssistantError::Offline);
        assert!(transport.calls.borrow().is_empty());

        let err = block_on(request_with_failover(
            &transport,
            &AssumeOnline,
            &[],
            &request,
        ))
        .unwrap_err();
        assert_eq!(err, AssistantError::NoCredentials);
    }

    #[test]
    fn noop_transport_always_fails() {
        let request = AssistantRequest::new("flash", "hi");
        let err = block_on(request_with_failover(
            &NoopAssistantTransport,
            &AssumeOnline,
            &["only".to_string()],
            &request,
        ))
        .unwrap_err();
        assert!(matches!(err, AssistantError::Exhausted { attempts: 1, .. }));
    }
}
