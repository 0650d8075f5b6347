use async_trait::async_trait;
use miette::Diagnostic;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::ErrorBody;

/// Status and untouched body text of a completed HTTP exchange.
///
/// The body is kept as text so a malformed payload surfaces as
/// [`ClientError::Deserialization`] rather than as a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait ClientTransport {
    type Error: std::error::Error + 'static;

    /// POST `body` as JSON to `route`. Only failures to obtain a response at
    /// all belong in `Self::Error`; every status code is a successful call.
    async fn post(&self, route: &str, body: serde_json::Value) -> Result<RawResponse, Self::Error>;
}

#[async_trait(?Send)]
impl<T> ClientTransport for std::rc::Rc<T>
where
    T: ClientTransport + ?Sized,
{
    type Error = T::Error;

    async fn post(&self, route: &str, body: serde_json::Value) -> Result<RawResponse, Self::Error> {
        (**self).post(route, body).await
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum ClientError<TransportError>
where
    TransportError: std::fmt::Debug + std::error::Error,
{
    #[error(transparent)]
    #[diagnostic(code(client::network))]
    Network(TransportError),
    #[error("HTTP {status}")]
    #[diagnostic(code(client::server))]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error(transparent)]
    #[diagnostic(code(client::deserialization))]
    Deserialization(serde_json::Error),
    #[error(transparent)]
    #[diagnostic(code(client::serialization))]
    Serialization(serde_json::Error),
}

impl<TransportError> ClientError<TransportError>
where
    TransportError: std::fmt::Debug + std::error::Error,
{
    /// True when the endpoint could not be reached or does not exist there,
    /// as opposed to answering with something we reject.
    pub fn is_unreachable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Server { status, .. } => matches!(*status, 404 | 405),
            ClientError::Deserialization(_) | ClientError::Serialization(_) => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub async fn post_json<T, Req, Resp>(
    transport: &T,
    route: &str,
    body: &Req,
) -> Result<Resp, ClientError<T::Error>>
where
    T: ClientTransport + ?Sized,
    T::Error: std::fmt::Debug,
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned,
{
    let body = serde_json::to_value(body).map_err(ClientError::Serialization)?;

    let resp = transport
        .post(route, body)
        .await
        .map_err(ClientError::Network)?;

    if !resp.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&resp.body)
            .ok()
            .map(|body| body.error)
            .filter(|message| !message.is_empty());

        return Err(ClientError::Server {
            status: resp.status,
            message,
        });
    }

    serde_json::from_str(&resp.body).map_err(ClientError::Deserialization)
}
