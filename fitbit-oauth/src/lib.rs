//! Client for the Fitbit OAuth token endpoint.
//!
//! Only the client-credentials grant is implemented: the application
//! authenticates as itself (HTTP Basic, `client_id:client_secret`) and no
//! user-specific credential is ever sent to the provider. A single request is
//! made per exchange; retrying is the caller's decision.

mod error;
mod models;

pub use error::ExchangeError;
pub use models::TokenGrant;

use oauth2::{
    basic::BasicClient, ClientId, ClientSecret, HttpRequest, HttpResponse, TokenResponse, TokenUrl,
};

const FITBIT_TOKEN_URL: &str = "https://api.fitbit.com/oauth2/token";

// Simple async HTTP transport for oauth2
async fn http_client(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = reqwest::Client::new();
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

pub struct FitbitOAuthClient {
    client_id: String,
    client_secret: String,
    token_url: TokenUrl,
}

impl FitbitOAuthClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ExchangeError> {
        Self::with_token_url(client_id, client_secret, FITBIT_TOKEN_URL)
    }

    /// Point the client at a non-default token endpoint (mock servers,
    /// regional proxies).
    pub fn with_token_url(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: &str,
    ) -> Result<Self, ExchangeError> {
        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: TokenUrl::new(token_url.to_string())?,
        })
    }

    /// Obtain a fresh application access token with the client-credentials
    /// grant. Sends exactly one request; any non-2xx answer or transport
    /// fault surfaces as an [`ExchangeError`].
    pub async fn exchange_client_credentials(&self) -> Result<TokenGrant, ExchangeError> {
        let token_result = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_token_uri(self.token_url.clone())
            .exchange_client_credentials()
            .request_async(&http_client)
            .await?;

        let access_token = token_result.access_token().secret().to_string();
        let expires_in = token_result
            .expires_in()
            .ok_or(ExchangeError::MissingExpiration)?;

        tracing::debug!(
            expires_in = expires_in.as_secs(),
            "client-credentials exchange succeeded"
        );

        Ok(TokenGrant {
            access_token,
            expires_in: expires_in.as_secs(),
        })
    }
}
