use otbozor_logging::{market_debug, market_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{decode_envelope, into_page, require_data, Envelope, Paged};
use crate::error::{map_reqwest_error, ApiError, ErrorKind};
use crate::settings::{AuthStrategy, ClientSettings};

/// Thin JSON client for the marketplace REST API.
///
/// Cloning is cheap and shares the connection pool (and cookie jar).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    auth: AuthStrategy,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url).map_err(|err| {
            ApiError::new(
                ErrorKind::Validation,
                format!("invalid api url {:?}: {err}", settings.base_url),
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                ErrorKind::Validation,
                format!("api url {:?} cannot carry a path", settings.base_url),
            ));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_store(settings.auth == AuthStrategy::CookieSession)
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self {
            http,
            base,
            auth: settings.auth.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn auth(&self) -> &AuthStrategy {
        &self.auth
    }

    /// Same connection pool, different credentials.
    pub fn with_auth(&self, auth: AuthStrategy) -> Self {
        Self {
            http: self.http.clone(),
            base: self.base.clone(),
            auth,
        }
    }

    /// `base` + percent-encoded path segments.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(ErrorKind::Validation, "api url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Envelope<T>, ApiError> {
        market_debug!("{} {}", method, url.path());
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let AuthStrategy::Bearer(token) = &self.auth {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let result = decode_envelope(status, &bytes);
        if let Err(err) = &result {
            market_warn!("{} {} failed: {}", method, url.path(), err);
        }
        result
    }

    pub(crate) async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        require_data(self.execute(Method::GET, url, None).await?)
    }

    pub(crate) async fn get_page<T: DeserializeOwned>(&self, url: Url) -> Result<Paged<T>, ApiError> {
        Ok(into_page(self.execute(Method::GET, url, None).await?))
    }

    pub(crate) async fn send_data<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        require_data(self.execute(method, url, body).await?)
    }

    /// For endpoints whose answer carries nothing worth keeping.
    pub(crate) async fn send_unit(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(method, url, body)
            .await
            .map(|_| ())
    }
}

pub(crate) fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body)
        .map_err(|err| ApiError::new(ErrorKind::Unknown, format!("failed to encode request: {err}")))
}

/// Appends non-empty query pairs.
pub(crate) fn with_query(mut url: Url, pairs: &[(&str, String)]) -> Url {
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientSettings::with_base_url(base)).unwrap()
    }

    #[test]
    fn endpoint_encodes_segments_and_keeps_prefix() {
        let api = client("https://api.example.uz/backend/");
        let url = api.endpoint(&["api", "listings", "qora bayir"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.uz/backend/api/listings/qora%20bayir");
    }

    #[test]
    fn empty_query_values_are_skipped() {
        let api = client("http://localhost:4000");
        let url = api.endpoint(&["api", "listings"]).unwrap();
        let url = with_query(url, &[("page", "2".into()), ("regionId", String::new())]);
        assert_eq!(url.query(), Some("page=2"));

        let url = with_query(api.endpoint(&["x"]).unwrap(), &[("a", String::new())]);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new(&ClientSettings::with_base_url("not a url")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
