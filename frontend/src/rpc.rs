use async_trait::async_trait;
use gloo_net::http::Request;
use shared::{ClientTransport, RawResponse};

/// Same-origin fetch transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct Client;

#[async_trait(?Send)]
impl ClientTransport for Client {
    type Error = gloo_net::Error;

    async fn post(&self, route: &str, body: serde_json::Value) -> Result<RawResponse, Self::Error> {
        let req = Request::post(route).json(&body)?;

        let resp = req.send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        Ok(RawResponse { status, body })
    }
}
