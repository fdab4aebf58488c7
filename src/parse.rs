use std::io::Read;

use flate2::read::GzDecoder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::{Endpoint, PayloadKind};
use crate::error::TicketsError;
use crate::model::{CheapPrices, NearestPlacesMatrix, Ticket};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

/// The `data` member of a successful response, tagged by the endpoint that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Tickets(Vec<Ticket>),
    NearestPlaces(NearestPlacesMatrix),
    Cheap(CheapPrices),
}

impl ResponseBody {
    pub fn into_tickets(self) -> Result<Vec<Ticket>, TicketsError> {
        match self {
            Self::Tickets(tickets) => Ok(tickets),
            other => Err(unexpected(PayloadKind::Tickets, &other)),
        }
    }

    pub fn into_nearest_places(self) -> Result<NearestPlacesMatrix, TicketsError> {
        match self {
            Self::NearestPlaces(matrix) => Ok(matrix),
            other => Err(unexpected(PayloadKind::NearestPlaces, &other)),
        }
    }

    pub fn into_cheap(self) -> Result<CheapPrices, TicketsError> {
        match self {
            Self::Cheap(prices) => Ok(prices),
            other => Err(unexpected(PayloadKind::CheapByDestination, &other)),
        }
    }

    fn kind(&self) -> PayloadKind {
        match self {
            Self::Tickets(_) => PayloadKind::Tickets,
            Self::NearestPlaces(_) => PayloadKind::NearestPlaces,
            Self::Cheap(_) => PayloadKind::CheapByDestination,
        }
    }
}

fn unexpected(expected: PayloadKind, got: &ResponseBody) -> TicketsError {
    TicketsError::Decode(format!(
        "expected {expected:?} payload, got {:?}",
        got.kind()
    ))
}

/// Gunzips `body` when gzip was negotiated and the bytes carry the gzip
/// magic. Transports that already decoded the body pass through untouched.
pub fn decompress(body: &[u8], accept_gzip: bool) -> Result<Vec<u8>, TicketsError> {
    if !accept_gzip || !body.starts_with(&GZIP_MAGIC) {
        return Ok(body.to_vec());
    }

    let mut decoded = Vec::new();
    GzDecoder::new(body)
        .read_to_end(&mut decoded)
        .map_err(|e| TicketsError::Decode(format!("gzip: {e}")))?;
    Ok(decoded)
}

fn decode_data<T: DeserializeOwned>(data: Value, endpoint: Endpoint) -> Result<T, TicketsError> {
    serde_json::from_value(data)
        .map_err(|e| TicketsError::Decode(format!("{} data: {e}", endpoint.path())))
}

pub fn parse_envelope(json: &[u8], endpoint: Endpoint) -> Result<ResponseBody, TicketsError> {
    let envelope: Envelope = serde_json::from_slice(json)
        .map_err(|e| TicketsError::Decode(format!("{} envelope: {e}", endpoint.path())))?;

    if !envelope.success {
        return Err(TicketsError::Api {
            message: envelope.message,
        });
    }

    match endpoint.payload_kind() {
        PayloadKind::Tickets => decode_data(envelope.data, endpoint).map(ResponseBody::Tickets),
        PayloadKind::NearestPlaces => {
            decode_data(envelope.data, endpoint).map(ResponseBody::NearestPlaces)
        }
        PayloadKind::CheapByDestination => {
            decode_data(envelope.data, endpoint).map(ResponseBody::Cheap)
        }
    }
}

pub fn parse_response(
    body: &[u8],
    endpoint: Endpoint,
    accept_gzip: bool,
) -> Result<ResponseBody, TicketsError> {
    let json = decompress(body, accept_gzip)?;
    parse_envelope(&json, endpoint)
}
