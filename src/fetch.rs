use tracing::debug;
use wreq::Client;
use wreq::header::{ACCEPT, ACCEPT_ENCODING, HeaderMap, HeaderName, HeaderValue};

use crate::error::TicketsError;

pub const APPLICATION_JSON: &str = "application/json";
pub const GZIP: &str = "gzip";
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Settings for the transport the client builds when none is injected.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub proxy: Option<String>,
}

pub fn build_transport(options: &FetchOptions, accept_gzip: bool) -> Result<Client, TicketsError> {
    let mut builder = Client::builder().gzip(accept_gzip);

    if let Some(ref proxy) = options.proxy {
        let proxy = wreq::Proxy::all(proxy.as_str()).map_err(|e| {
            TicketsError::InvalidArgument(format!("invalid proxy URL {proxy}: {e}"))
        })?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(TicketsError::Transport)
}

/// Headers attached to every request. Computed once when the client is built.
pub fn request_headers(
    token: &str,
    accept_gzip: bool,
    token_in_query: bool,
) -> Result<HeaderMap, TicketsError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

    if accept_gzip {
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(GZIP));
    }

    if !token_in_query {
        let mut value = HeaderValue::from_str(token).map_err(|_| {
            TicketsError::InvalidArgument("token contains characters not allowed in a header".into())
        })?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(ACCESS_TOKEN_HEADER), value);
    }

    Ok(headers)
}

pub async fn fetch_bytes(
    client: &Client,
    url: String,
    params: &[(String, String)],
    headers: &HeaderMap,
) -> Result<Vec<u8>, TicketsError> {
    let response = client
        .get(url)
        .headers(headers.clone())
        .query(params)
        .send()
        .await?
        .error_for_status()?;

    debug!(status = response.status().as_u16(), "response received");

    let body = response.bytes().await?;
    debug!(bytes = body.len(), "response body read");
    Ok(body.to_vec())
}
