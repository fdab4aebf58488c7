pub const BASE_URL: &str = "https://api.travelpayouts.com/";

pub mod params {
    pub const CURRENCY: &str = "currency";
    pub const ORIGIN: &str = "origin";
    pub const DESTINATION: &str = "destination";
    pub const BEGINNING_OF_PERIOD: &str = "beginning_of_period";
    pub const PERIOD_TYPE: &str = "period_type";
    pub const ONE_WAY: &str = "one_way";
    pub const PAGE: &str = "page";
    pub const LIMIT: &str = "limit";
    pub const SHOW_TO_AFFILIATES: &str = "show_to_affiliates";
    pub const SORTING: &str = "sorting";
    pub const TRIP_DURATION: &str = "trip_duration";
    pub const TOKEN: &str = "token";
    pub const DEPART_DATE: &str = "depart_date";
    pub const RETURN_DATE: &str = "return_date";
    pub const DISTANCE: &str = "distance";
    pub const FLEXIBILITY: &str = "flexibility";
    pub const MONTH: &str = "month";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Latest,
    MonthMatrix,
    NearestPlacesMatrix,
    Cheap,
}

/// Shape of the `data` member returned by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Tickets,
    NearestPlaces,
    CheapByDestination,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Self::Latest,
        Self::MonthMatrix,
        Self::NearestPlacesMatrix,
        Self::Cheap,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Latest => "v2/prices/latest",
            Self::MonthMatrix => "v2/prices/month-matrix",
            Self::NearestPlacesMatrix => "v2/prices/nearest-places-matrix",
            Self::Cheap => "v1/prices/cheap",
        }
    }

    pub fn payload_kind(&self) -> PayloadKind {
        match self {
            Self::Latest | Self::MonthMatrix => PayloadKind::Tickets,
            Self::NearestPlacesMatrix => PayloadKind::NearestPlaces,
            Self::Cheap => PayloadKind::CheapByDestination,
        }
    }

    /// Joins the path onto `base`, tolerating a missing trailing slash.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.path())
    }
}
