pub mod error;
pub mod types;

pub use error::{NeoWsError, Result};
pub use types::{
    CloseApproach, DiameterRange, EstimatedDiameter, FeedResponse, MissDistance, RawNeo,
    RelativeVelocity,
};

use chrono::NaiveDate;

pub const DEFAULT_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// Date format the feed endpoint expects for `start_date` / `end_date`.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

pub struct NeoWsClient {
    client: reqwest::Client,
    feed_url: String,
    api_key: String,
}

impl NeoWsClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_feed_url(api_key, DEFAULT_FEED_URL)
    }

    /// Point the client at a different feed endpoint (proxies, local fixtures).
    pub fn with_feed_url(api_key: &str, feed_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            feed_url: feed_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Query parameters for a feed request, in the order the API documents them.
    pub fn feed_params(&self, start: NaiveDate, end: NaiveDate) -> [(&'static str, String); 3] {
        [
            ("start_date", start.format(API_DATE_FORMAT).to_string()),
            ("end_date", end.format(API_DATE_FORMAT).to_string()),
            ("api_key", self.api_key.clone()),
        ]
    }

    /// Fetch close approaches between `start` and `end` (inclusive).
    /// Any non-2xx response is returned as [`NeoWsError::Api`].
    pub async fn feed(&self, start: NaiveDate, end: NaiveDate) -> Result<FeedResponse> {
        tracing::debug!(%start, %end, url = %self.feed_url, "Requesting NeoWs feed");

        let resp = self
            .client
            .get(&self.feed_url)
            .query(&self.feed_params(start, end))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %start, %end, "NeoWs feed request failed");
            return Err(NeoWsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let feed: FeedResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            dates = feed.near_earth_objects.len(),
            element_count = feed.element_count.unwrap_or_default(),
            "NeoWs feed received"
        );
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, API_DATE_FORMAT).unwrap()
    }

    #[test]
    fn feed_params_use_iso_dates_and_key() {
        let client = NeoWsClient::new("abc");
        let params = client.feed_params(date("2024-01-01"), date("2024-01-08"));
        assert_eq!(params[0], ("start_date", "2024-01-01".to_string()));
        assert_eq!(params[1], ("end_date", "2024-01-08".to_string()));
        assert_eq!(params[2], ("api_key", "abc".to_string()));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_feed_url() {
        let client = NeoWsClient::with_feed_url("k", "http://localhost:9000/feed/");
        assert_eq!(client.feed_url(), "http://localhost:9000/feed");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client = NeoWsClient::with_feed_url("k", "http://127.0.0.1:9/feed");
        let err = client
            .feed(date("2024-01-01"), date("2024-01-08"))
            .await
            .unwrap_err();
        assert!(matches!(err, NeoWsError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn successful_feed_sends_dates_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .and(query_param("start_date", "2024-01-01"))
            .and(query_param("end_date", "2024-01-08"))
            .and(query_param("api_key", "k"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"element_count": 0, "near_earth_objects": {"2024-01-01": []}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = NeoWsClient::with_feed_url("k", &format!("{}/feed", server.uri()));
        let feed = client
            .feed(date("2024-01-01"), date("2024-01-08"))
            .await
            .unwrap();
        assert_eq!(feed.near_earth_objects.len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = NeoWsClient::with_feed_url("k", &format!("{}/feed", server.uri()));
        let err = client
            .feed(date("2024-01-01"), date("2024-01-08"))
            .await
            .unwrap_err();
        match err {
            NeoWsError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = NeoWsClient::with_feed_url("k", &format!("{}/feed", server.uri()));
        let err = client
            .feed(date("2024-01-01"), date("2024-01-08"))
            .await
            .unwrap_err();
        assert!(matches!(err, NeoWsError::Parse(_)), "got {err:?}");
    }
}
