use std::fmt;

use tracing::{debug, warn};
use wreq::Client;
use wreq::header::HeaderMap;

use crate::endpoint::{BASE_URL, Endpoint};
use crate::error::TicketsError;
use crate::fetch::{self, FetchOptions};
use crate::model::{CheapPrices, NearestPlacesMatrix, Ticket};
use crate::parse::{self, ResponseBody};
use crate::query::{CheapQuery, LatestQuery, MonthMatrixQuery, NearestPlacesQuery, QueryString};

/// Client for the Travelpayouts tickets cache API.
///
/// Configuration is fixed at [`ClientBuilder::build`]; clones share the
/// underlying transport and may be used concurrently.
#[derive(Clone)]
pub struct TicketsCacheClient {
    transport: Client,
    headers: HeaderMap,
    token: String,
    accept_gzip: bool,
    token_in_query: bool,
    base_url: String,
}

pub struct ClientBuilder {
    token: String,
    transport: Option<Client>,
    accept_gzip: bool,
    token_in_query: bool,
    base_url: String,
    fetch_options: FetchOptions,
}

impl ClientBuilder {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            transport: None,
            accept_gzip: true,
            token_in_query: false,
            base_url: BASE_URL.to_string(),
            fetch_options: FetchOptions::default(),
        }
    }

    /// Use an existing transport instead of building one.
    pub fn transport(mut self, transport: Client) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn accept_gzip(mut self, accept: bool) -> Self {
        self.accept_gzip = accept;
        self
    }

    /// Send the token as `?token=` instead of the `X-Access-Token` header.
    pub fn token_in_query(mut self, in_query: bool) -> Self {
        self.token_in_query = in_query;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Only consulted when no transport is injected.
    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    pub fn build(self) -> Result<TicketsCacheClient, TicketsError> {
        if self.token.trim().is_empty() {
            return Err(TicketsError::InvalidArgument(
                "an API token is required".into(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(TicketsError::InvalidArgument(
                "base URL must not be empty".into(),
            ));
        }

        let headers = fetch::request_headers(&self.token, self.accept_gzip, self.token_in_query)?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => fetch::build_transport(&self.fetch_options, self.accept_gzip)?,
        };

        Ok(TicketsCacheClient {
            transport,
            headers,
            token: self.token,
            accept_gzip: self.accept_gzip,
            token_in_query: self.token_in_query,
            base_url: self.base_url,
        })
    }
}

impl TicketsCacheClient {
    pub fn new(token: impl Into<String>) -> Result<Self, TicketsError> {
        Self::builder(token).build()
    }

    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    pub fn accepts_gzip(&self) -> bool {
        self.accept_gzip
    }

    pub fn sends_token_in_query(&self) -> bool {
        self.token_in_query
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prices found by users over the last 48 hours.
    pub async fn get_latest(&self, query: &LatestQuery) -> Result<Vec<Ticket>, TicketsError> {
        query.validate()?;
        let mut params = self.seed_query();
        query.encode(&mut params);
        self.execute(Endpoint::Latest, params).await?.into_tickets()
    }

    /// Prices for each day of a month, grouped by number of changes.
    pub async fn get_month_matrix(
        &self,
        query: &MonthMatrixQuery,
    ) -> Result<Vec<Ticket>, TicketsError> {
        query.validate()?;
        let mut params = self.seed_query();
        query.encode(&mut params);
        self.execute(Endpoint::MonthMatrix, params)
            .await?
            .into_tickets()
    }

    /// Prices between cities near the requested origin and destination.
    pub async fn get_nearest_places_matrix(
        &self,
        query: &NearestPlacesQuery,
    ) -> Result<NearestPlacesMatrix, TicketsError> {
        query.validate()?;
        let mut params = self.seed_query();
        query.encode(&mut params);
        self.execute(Endpoint::NearestPlacesMatrix, params)
            .await?
            .into_nearest_places()
    }

    /// Cheapest non-stop, one-stop and two-stop tickets, keyed by destination
    /// and then by number of stops.
    pub async fn get_cheap(&self, query: &CheapQuery) -> Result<CheapPrices, TicketsError> {
        query.validate()?;
        let mut params = self.seed_query();
        query.encode(&mut params);
        self.execute(Endpoint::Cheap, params).await?.into_cheap()
    }

    fn seed_query(&self) -> QueryString {
        if self.token_in_query {
            QueryString::with_token(&self.token)
        } else {
            QueryString::new()
        }
    }

    async fn execute(
        &self,
        endpoint: Endpoint,
        query: QueryString,
    ) -> Result<ResponseBody, TicketsError> {
        debug!(
            endpoint = endpoint.path(),
            params = query.len(),
            token_in_query = self.token_in_query,
            "requesting tickets cache"
        );

        let url = endpoint.url(&self.base_url);
        let body = fetch::fetch_bytes(&self.transport, url, query.params(), &self.headers).await?;

        let parsed = parse::parse_response(&body, endpoint, self.accept_gzip);
        if let Err(TicketsError::Api { message }) = &parsed {
            warn!(
                endpoint = endpoint.path(),
                reason = message.as_deref().unwrap_or_default(),
                "API reported failure"
            );
        }
        parsed
    }
}

impl fmt::Debug for TicketsCacheClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketsCacheClient")
            .field("token", &"<redacted>")
            .field("accept_gzip", &self.accept_gzip)
            .field("token_in_query", &self.token_in_query)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
