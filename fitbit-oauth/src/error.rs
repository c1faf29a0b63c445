use oauth2::basic::BasicErrorResponseType;
use oauth2::{RequestTokenError, StandardErrorResponse};
use thiserror::Error;

type OAuth2Error =
    RequestTokenError<reqwest::Error, StandardErrorResponse<BasicErrorResponseType>>;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("invalid token URL: {0}")]
    TokenUrl(#[from] oauth2::url::ParseError),

    /// The provider answered, but rejected the exchange. `detail` carries the
    /// upstream body (parsed when it is a standard OAuth error, raw otherwise).
    #[error("provider rejected the exchange: {detail}")]
    Provider { detail: String },

    #[error("token request failed: {0}")]
    Transport(String),

    #[error("token response is missing an expiration")]
    MissingExpiration,
}

impl From<OAuth2Error> for ExchangeError {
    fn from(err: OAuth2Error) -> Self {
        match err {
            RequestTokenError::ServerResponse(response) => ExchangeError::Provider {
                detail: response.to_string(),
            },
            // Non-standard error bodies (Fitbit wraps errors in an `errors`
            // array) end up here; keep the raw body so callers can surface it.
            RequestTokenError::Parse(_, body) => ExchangeError::Provider {
                detail: String::from_utf8_lossy(&body).into_owned(),
            },
            RequestTokenError::Request(e) => ExchangeError::Transport(e.to_string()),
            RequestTokenError::Other(msg) => ExchangeError::Transport(msg),
        }
    }
}
