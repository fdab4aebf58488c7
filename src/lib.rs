pub mod client;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod model;
pub mod parse;
pub mod query;

pub use client::{ClientBuilder, TicketsCacheClient};
pub use endpoint::Endpoint;
pub use error::TicketsError;
pub use fetch::FetchOptions;
pub use model::{CheapPrices, CheapTicket, NearestPlacesMatrix, Ticket};
pub use query::{
    CheapQuery, Currency, LatestQuery, MonthMatrixQuery, NearestPlacesQuery, PeriodType,
    QueryString, QueryValue, Sorting,
};
