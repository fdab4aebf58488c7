use std::fmt;

#[derive(Debug)]
pub enum TicketsError {
    /// Rejected before any request was sent.
    InvalidArgument(String),
    /// Connection failure or a non-2xx status, exactly as the transport reported it.
    Transport(wreq::Error),
    /// The API answered with `"success": false`.
    Api { message: Option<String> },
    /// The body was not valid gzip or did not match the endpoint's JSON shape.
    Decode(String),
}

impl TicketsError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => message.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for TicketsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Api {
                message: Some(message),
            } => write!(f, "API reported failure: {message}"),
            Self::Api { message: None } => {
                write!(f, "API reported failure without a message")
            }
            Self::Decode(detail) => write!(
                f,
                "failed to decode API response: {detail}"
            ),
        }
    }
}

impl std::error::Error for TicketsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<wreq::Error> for TicketsError {
    fn from(err: wreq::Error) -> Self {
        Self::Transport(err)
    }
}
