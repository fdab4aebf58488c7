use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::endpoint::params;
use crate::error::TicketsError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that can be written into the query string.
///
/// `None` means "leave the parameter out", which is how empty strings are
/// treated.
pub trait QueryValue {
    fn to_query_value(&self) -> Option<String>;
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> Option<String> {
        (**self).to_query_value()
    }
}

impl QueryValue for str {
    fn to_query_value(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> Option<String> {
        self.as_str().to_query_value()
    }
}

impl QueryValue for bool {
    fn to_query_value(&self) -> Option<String> {
        Some(if *self { "true" } else { "false" }.to_string())
    }
}

macro_rules! integer_query_value {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

integer_query_value!(i32, i64, u16, u32, u64);

impl QueryValue for NaiveDate {
    fn to_query_value(&self) -> Option<String> {
        Some(self.format(DATE_FORMAT).to_string())
    }
}

impl QueryValue for NaiveDateTime {
    fn to_query_value(&self) -> Option<String> {
        self.date().to_query_value()
    }
}

impl<Tz: TimeZone> QueryValue for DateTime<Tz> {
    fn to_query_value(&self) -> Option<String> {
        self.date_naive().to_query_value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sorting {
    Price,
    Route,
    DistanceUnitPrice,
}

impl Sorting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Route => "route",
            Self::DistanceUnitPrice => "distance_unit_price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodType {
    Month,
    Year,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn from_month_flag(is_month: bool) -> Self {
        if is_month {
            Self::Month
        } else {
            Self::Year
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Rub,
    Uah,
    Kzt,
    Byn,
    Thb,
    Cny,
    Inr,
    Try,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Rub => "rub",
            Self::Uah => "uah",
            Self::Kzt => "kzt",
            Self::Byn => "byn",
            Self::Thb => "thb",
            Self::Cny => "cny",
            Self::Inr => "inr",
            Self::Try => "try",
        }
    }

    pub fn from_str_loose(s: &str) -> Result<Self, TicketsError> {
        match s.to_ascii_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "eur" => Ok(Self::Eur),
            "gbp" => Ok(Self::Gbp),
            "rub" => Ok(Self::Rub),
            "uah" => Ok(Self::Uah),
            "kzt" => Ok(Self::Kzt),
            "byn" => Ok(Self::Byn),
            "thb" => Ok(Self::Thb),
            "cny" => Ok(Self::Cny),
            "inr" => Ok(Self::Inr),
            "try" => Ok(Self::Try),
            _ => Err(TicketsError::InvalidArgument(format!(
                "unsupported currency: {s}"
            ))),
        }
    }
}

macro_rules! wire_name_query_value {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> Option<String> {
                    Some(self.as_str().to_string())
                }
            }
        )*
    };
}

wire_name_query_value!(Sorting, PeriodType, Currency);

/// Ordered `name=value` pairs for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    params: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let mut query = Self::new();
        query.push(params::TOKEN, Some(token));
        query
    }

    pub fn push<V: QueryValue>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(formatted) = value.and_then(|v| v.to_query_value()) {
            self.params.push((name.to_string(), formatted));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn into_params(self) -> Vec<(String, String)> {
        self.params
    }
}

/// Parameters of `v2/prices/latest`.
#[derive(Debug, Clone, Default)]
pub struct LatestQuery {
    pub currency: Option<Currency>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub beginning_of_period: Option<NaiveDate>,
    pub period_type: Option<PeriodType>,
    pub one_way: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub show_to_affiliates: Option<bool>,
    pub sorting: Option<Sorting>,
    pub trip_duration_weeks: Option<u32>,
}

impl LatestQuery {
    pub fn validate(&self) -> Result<(), TicketsError> {
        if self.period_type == Some(PeriodType::Month) && self.beginning_of_period.is_none() {
            return Err(TicketsError::InvalidArgument(
                "beginning_of_period is required when period_type is month".into(),
            ));
        }
        Ok(())
    }

    pub fn encode<'q>(&self, query: &'q mut QueryString) -> &'q mut QueryString {
        query
            .push(params::CURRENCY, self.currency)
            .push(params::ORIGIN, self.origin.as_deref())
            .push(params::DESTINATION, self.destination.as_deref())
            .push(params::BEGINNING_OF_PERIOD, self.beginning_of_period)
            .push(params::PERIOD_TYPE, self.period_type)
            .push(params::ONE_WAY, self.one_way)
            .push(params::PAGE, self.page)
            .push(params::LIMIT, self.limit)
            .push(params::SHOW_TO_AFFILIATES, self.show_to_affiliates)
            .push(params::SORTING, self.sorting)
            .push(params::TRIP_DURATION, self.trip_duration_weeks)
    }

    pub fn to_url_params(&self) -> Vec<(String, String)> {
        let mut query = QueryString::new();
        self.encode(&mut query);
        query.into_params()
    }
}

/// Parameters of `v2/prices/month-matrix`.
#[derive(Debug, Clone, Default)]
pub struct MonthMatrixQuery {
    pub currency: Option<Currency>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub show_to_affiliates: Option<bool>,
    pub month: Option<NaiveDate>,
}

impl MonthMatrixQuery {
    pub fn validate(&self) -> Result<(), TicketsError> {
        Ok(())
    }

    pub fn encode<'q>(&self, query: &'q mut QueryString) -> &'q mut QueryString {
        query
            .push(params::CURRENCY, self.currency)
            .push(params::ORIGIN, self.origin.as_deref())
            .push(params::DESTINATION, self.destination.as_deref())
            .push(params::SHOW_TO_AFFILIATES, self.show_to_affiliates)
            .push(params::MONTH, self.month)
    }

    pub fn to_url_params(&self) -> Vec<(String, String)> {
        let mut query = QueryString::new();
        self.encode(&mut query);
        query.into_params()
    }
}

/// Parameters of `v2/prices/nearest-places-matrix`.
#[derive(Debug, Clone, Default)]
pub struct NearestPlacesQuery {
    pub currency: Option<Currency>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub show_to_affiliates: Option<bool>,
    pub depart_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub distance: Option<u32>,
    pub limit: Option<u32>,
    pub flexibility: Option<u32>,
}

impl NearestPlacesQuery {
    pub fn validate(&self) -> Result<(), TicketsError> {
        Ok(())
    }

    pub fn encode<'q>(&self, query: &'q mut QueryString) -> &'q mut QueryString {
        query
            .push(params::CURRENCY, self.currency)
            .push(params::ORIGIN, self.origin.as_deref())
            .push(params::DESTINATION, self.destination.as_deref())
            .push(params::SHOW_TO_AFFILIATES, self.show_to_affiliates)
            .push(params::DEPART_DATE, self.depart_date)
            .push(params::RETURN_DATE, self.return_date)
            .push(params::DISTANCE, self.distance)
            .push(params::LIMIT, self.limit)
            .push(params::FLEXIBILITY, self.flexibility)
    }

    pub fn to_url_params(&self) -> Vec<(String, String)> {
        let mut query = QueryString::new();
        self.encode(&mut query);
        query.into_params()
    }
}

/// Parameters of the legacy `v1/prices/cheap`. The origin is mandatory.
#[derive(Debug, Clone, Default)]
pub struct CheapQuery {
    pub origin: String,
    pub destination: Option<String>,
    pub depart_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub currency: Option<Currency>,
    pub page: Option<u32>,
}

impl CheapQuery {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TicketsError> {
        if self.origin.trim().is_empty() {
            return Err(TicketsError::InvalidArgument(
                "origin must be specified".into(),
            ));
        }
        Ok(())
    }

    pub fn encode<'q>(&self, query: &'q mut QueryString) -> &'q mut QueryString {
        query
            .push(params::CURRENCY, self.currency)
            .push(params::ORIGIN, Some(self.origin.as_str()))
            .push(params::DESTINATION, self.destination.as_deref())
            .push(params::DEPART_DATE, self.depart_date)
            .push(params::RETURN_DATE, self.return_date)
            .push(params::PAGE, self.page)
    }

    pub fn to_url_params(&self) -> Vec<(String, String)> {
        let mut query = QueryString::new();
        self.encode(&mut query);
        query.into_params()
    }
}
