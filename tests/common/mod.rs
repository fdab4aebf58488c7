#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::Response;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "API_TOKEN";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| {
                let (k, v) = p.split_once('=').unwrap_or((p, ""));
                (k.to_string(), v.to_string())
            })
            .collect()
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Vec<u8>,
    content_encoding: Option<&'static str>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockApi {
    pub async fn start(status: u16, body: Vec<u8>, content_encoding: Option<&'static str>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Canned {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            content_encoding,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(respond).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            base_url: format!("http://{addr}/"),
            requests,
        }
    }

    pub async fn json(value: Value) -> Self {
        Self::start(200, value.to_string().into_bytes(), None).await
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

async fn respond(State(state): State<Canned>, uri: Uri, headers: HeaderMap) -> Response {
    state.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        headers,
    });

    let mut builder = Response::builder()
        .status(state.status)
        .header(CONTENT_TYPE, "application/json");
    if let Some(encoding) = state.content_encoding {
        builder = builder.header(CONTENT_ENCODING, encoding);
    }
    builder.body(Body::from(state.body.clone())).unwrap()
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

pub fn ticket_json(origin: &str, destination: &str, value: u32) -> Value {
    json!({
        "show_to_affiliates": true,
        "trip_class": 0,
        "origin": origin,
        "destination": destination,
        "depart_date": "2016-02-05",
        "return_date": "2016-02-14",
        "number_of_changes": 1,
        "value": value,
        "found_at": "2016-01-31T19:22:56",
        "distance": 7512,
        "actual": true,
        "duration": 1185,
        "gate": "Aviakassa"
    })
}

pub fn latest_success() -> Value {
    json!({
        "success": true,
        "data": [ticket_json("MOW", "HKT", 1183)],
        "error": ""
    })
}

pub fn nearest_places_success() -> Value {
    json!({
        "success": true,
        "data": {
            "prices": [
                ticket_json("MOW", "HKT", 51155),
                ticket_json("LED", "HKT", 52010),
                ticket_json("MOW", "BKK", 48700),
                ticket_json("LED", "BKK", 49900)
            ],
            "origins": ["MOW", "LED"],
            "destinations": ["HKT", "BKK"],
            "errors": { "amadeus": {} }
        }
    })
}

pub fn cheap_success() -> Value {
    json!({
        "success": true,
        "data": {
            "HKT": {
                "0": {
                    "price": 35443,
                    "airline": "UN",
                    "flight_number": 571,
                    "departure_at": "2015-06-09T21:20:00Z",
                    "return_at": "2015-07-15T12:40:00Z",
                    "expires_at": "2015-01-08T18:30:40Z"
                }
            }
        }
    })
}

pub fn unauthorized() -> Value {
    json!({
        "success": false,
        "data": null,
        "message": "Unauthorized"
    })
}
