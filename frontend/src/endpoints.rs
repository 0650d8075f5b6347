use serde::{de::DeserializeOwned, Serialize};
use shared::{post_json, ClientError, ClientTransport};

use crate::config::Endpoint;

/// Try each candidate in order, moving on only while the current one is
/// unreachable. A reachable endpoint that answers badly ends the sequence.
///
/// `body_for` builds the request body per endpoint, since candidates differ in
/// which fields they accept.
pub async fn send_with_fallback<T, Req, Resp, F>(
    transport: &T,
    endpoints: &[Endpoint],
    mut body_for: F,
) -> Result<Resp, ClientError<T::Error>>
where
    T: ClientTransport + ?Sized,
    Req: Serialize,
    Resp: DeserializeOwned,
    F: FnMut(&Endpoint) -> Req,
{
    let mut last_err = None;

    for (attempt, endpoint) in endpoints.iter().enumerate() {
        let body = body_for(endpoint);

        match post_json(transport, &endpoint.path, &body).await {
            Ok(resp) => return Ok(resp),
            Err(err) if err.is_unreachable() => {
                tracing::warn!(
                    route = %endpoint.path,
                    attempt = attempt + 1,
                    error = %err,
                    "endpoint unreachable, trying next candidate"
                );
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    // Config validation guarantees at least one endpoint, so this is only
    // reached after every candidate was tried.
    Err(last_err.unwrap_or(ClientError::Server {
        status: 404,
        message: Some("no endpoint configured".to_owned()),
    }))
}
