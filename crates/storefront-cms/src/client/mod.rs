//! HTTP client for the CMS REST API.

mod documents;

use std::time::Duration;

use percent_encoding::utf8_percent_encode;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use storefront_core::{AppConfig, ListingResult};

use crate::error::CmsError;
use crate::query::{ListingQuery, PATH_SEGMENT};

/// Client for the CMS collection and globals endpoints.
///
/// Listing responses are classified by body shape before status; see
/// [`CmsClient::fetch_listing`]. No request is retried; callers decide when
/// to ask again.
pub struct CmsClient {
    client: Client,
    base_url: String,
}

impl CmsClient {
    /// Creates a client for the CMS at `base_url` (scheme + host, optional
    /// path prefix).
    ///
    /// # Errors
    ///
    /// - [`CmsError::InvalidBaseUrl`] if `base_url` does not parse as a URL.
    /// - [`CmsError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CmsError> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| CmsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(CmsError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
        })
    }

    /// Creates a client from the loaded storefront configuration.
    ///
    /// # Errors
    ///
    /// See [`CmsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CmsError> {
        Self::new(
            &config.server_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of `relation` matching `query`.
    ///
    /// # Errors
    ///
    /// - [`CmsError::MalformedListing`] - body is JSON but has no `docs` array,
    ///   whatever the status.
    /// - [`CmsError::Deserialize`] - 2xx body is not JSON, or a doc does not match `T`.
    /// - [`CmsError::UnexpectedStatus`] - non-2xx status with a non-JSON body.
    /// - [`CmsError::Http`] - network or TLS failure.
    pub async fn fetch_listing<T: DeserializeOwned>(
        &self,
        relation: &str,
        query: &ListingQuery,
    ) -> Result<ListingResult<T>, CmsError> {
        let url = self.collection_url(relation, &query.to_query_string())?;
        tracing::debug!(relation, page = query.page, limit = query.limit, %url, "fetching listing");
        let body = self.get_listing_json(&url, relation).await?;
        decode_listing(relation, body)
    }

    /// Fetches a global document such as `header` or `footer`.
    ///
    /// # Errors
    ///
    /// Same as [`CmsClient::fetch_listing`], minus `MalformedListing`.
    pub async fn fetch_global<T: DeserializeOwned>(&self, slug: &str) -> Result<T, CmsError> {
        let segment = utf8_percent_encode(slug, PATH_SEGMENT);
        let url = self.parse_url(&format!("{}/api/globals/{segment}?depth=1", self.base_url))?;
        let context = format!("global \"{slug}\"");
        let body = self.get_json(&url, &context).await?;
        serde_json::from_value(body).map_err(|e| CmsError::Deserialize { context, source: e })
    }

    pub(crate) fn collection_url(&self, relation: &str, query: &str) -> Result<Url, CmsError> {
        let segment = utf8_percent_encode(relation, PATH_SEGMENT);
        self.parse_url(&format!("{}/api/{segment}?{query}", self.base_url))
    }

    fn parse_url(&self, raw: &str) -> Result<Url, CmsError> {
        Url::parse(raw).map_err(|e| CmsError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: format!("could not build request URL \"{raw}\": {e}"),
        })
    }

    async fn send(&self, url: &Url) -> Result<(StatusCode, String), CmsError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// GETs `url` and parses the body as JSON; any non-2xx status is an error.
    async fn get_json(&self, url: &Url, context: &str) -> Result<serde_json::Value, CmsError> {
        let (status, body) = self.send(url).await?;
        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        parse_json(context, &body)
    }

    /// GETs a collection listing.
    ///
    /// A non-2xx response whose body is still JSON (the CMS answers a bad
    /// `where` clause with `400 {"errors": [...]}`) is returned as-is, so it is
    /// classified by shape in [`decode_listing`]. Only a non-JSON body turns
    /// the status into [`CmsError::UnexpectedStatus`].
    async fn get_listing_json(
        &self,
        url: &Url,
        relation: &str,
    ) -> Result<serde_json::Value, CmsError> {
        let (status, body) = self.send(url).await?;
        if status.is_success() {
            return parse_json(relation, &body);
        }
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => {
                tracing::warn!(
                    relation,
                    status = status.as_u16(),
                    %url,
                    "listing request returned a JSON error body"
                );
                Ok(value)
            }
            Err(_) => Err(CmsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

fn parse_json(context: &str, body: &str) -> Result<serde_json::Value, CmsError> {
    serde_json::from_str(body).map_err(|e| CmsError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Validates that `body` is listing-shaped before decoding it.
fn decode_listing<T: DeserializeOwned>(
    relation: &str,
    body: serde_json::Value,
) -> Result<ListingResult<T>, CmsError> {
    let has_docs_array = body
        .get("docs")
        .is_some_and(serde_json::Value::is_array);
    if !has_docs_array {
        return Err(CmsError::MalformedListing {
            relation: relation.to_owned(),
        });
    }

    serde_json::from_value(body).map_err(|e| CmsError::Deserialize {
        context: format!("{relation} listing"),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
