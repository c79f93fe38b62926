use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::{null_as_default, MediaSummary, ShowcaseViewModel};
use crate::query::{ShowcaseQuery, ANILIST_ENDPOINT, PAGE_SIZE};

/// Every way the catalog round trip can fail. Callers of
/// [`CatalogClient::fetch_catalog`] never see it; it exists for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no data payload{}", format_messages(.messages))]
    MissingData { messages: Vec<String> },
}

fn format_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default, deserialize_with = "null_as_default")]
    media: Vec<MediaSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShowcaseData {
    #[serde(default)]
    hero: Option<MediaSummary>,
    #[serde(default)]
    trending: Option<Page>,
    #[serde(default)]
    popular: Option<Page>,
    #[serde(default)]
    action: Option<Page>,
    #[serde(default)]
    romance: Option<Page>,
    #[serde(default)]
    fantasy: Option<Page>,
    #[serde(default)]
    sci_fi: Option<Page>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<ShowcaseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

fn listing(page: Option<Page>) -> Vec<MediaSummary> {
    let mut media = page.map(|p| p.media).unwrap_or_default();
    media.truncate(PAGE_SIZE);
    media
}

impl From<ShowcaseData> for ShowcaseViewModel {
    fn from(data: ShowcaseData) -> Self {
        ShowcaseViewModel {
            hero: data.hero,
            trending: listing(data.trending),
            popular: listing(data.popular),
            action: listing(data.action),
            romance: listing(data.romance),
            fantasy: listing(data.fantasy),
            sci_fi: listing(data.sci_fi),
        }
    }
}

/// Decodes a composite response body. The body is accepted wholesale or not
/// at all; a single malformed result set rejects the whole response.
pub fn decode_showcase(body: &[u8]) -> Result<ShowcaseViewModel, FetchError> {
    let response: GraphQlResponse = serde_json::from_slice(body)?;
    match response.data {
        Some(data) => Ok(data.into()),
        None => Err(FetchError::MissingData {
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(ANILIST_ENDPOINT)
    }
}

impl CatalogClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One POST carrying the composite query. No retry and no timeout.
    pub async fn try_fetch_catalog(&self) -> Result<ShowcaseViewModel, FetchError> {
        debug!(endpoint = %self.endpoint, "requesting showcase catalog");
        let res = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&ShowcaseQuery::default())
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = res.bytes().await?;
        decode_showcase(&body)
    }

    /// Same round trip, with every failure collapsed to the empty view-model.
    pub async fn fetch_catalog(&self) -> ShowcaseViewModel {
        match self.try_fetch_catalog().await {
            Ok(vm) => vm,
            Err(e) => {
                error!(endpoint = %self.endpoint, error = %e, "error fetching AniList data");
                ShowcaseViewModel::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn media_json(id: i64) -> String {
        format!(
            r#"{{"id":{id},"title":{{"romaji":"Title {id}","english":null}},
                "coverImage":{{"large":"https://img/{id}.jpg","extraLarge":"https://img/{id}-xl.jpg"}},
                "bannerImage":null,"averageScore":{score},"description":"<b>Desc</b>",
                "genres":["Action"],"status":"FINISHED"}}"#,
            score = 50 + id
        )
    }

    fn page_json(ids: std::ops::Range<i64>) -> String {
        let media: Vec<String> = ids.map(media_json).collect();
        format!(r#"{{"media":[{}]}}"#, media.join(","))
    }

    #[test]
    fn populates_every_set_in_server_order() {
        let body = format!(
            r#"{{"data":{{"hero":{},"trending":{},"popular":{},"action":{},"romance":{},"fantasy":{},"sciFi":{}}}}}"#,
            media_json(1),
            page_json(10..13),
            page_json(20..28),
            page_json(30..31),
            page_json(40..40),
            page_json(50..52),
            page_json(60..68),
        );
        let vm = decode_showcase(body.as_bytes()).unwrap();
        assert_eq!(vm.hero.as_ref().map(|h| h.id), Some(1));
        let ids = |items: &[MediaSummary]| items.iter().map(|m| m.id).collect::<Vec<_>>();
        assert_eq!(ids(&vm.trending), vec![10, 11, 12]);
        assert_eq!(ids(&vm.popular), (20..28).collect::<Vec<_>>());
        assert_eq!(ids(&vm.action), vec![30]);
        assert!(vm.romance.is_empty());
        assert_eq!(ids(&vm.fantasy), vec![50, 51]);
        assert_eq!(vm.sci_fi.len(), 8);
    }

    #[test]
    fn oversized_pages_are_truncated() {
        let body = format!(r#"{{"data":{{"trending":{}}}}}"#, page_json(0..12));
        let vm = decode_showcase(body.as_bytes()).unwrap();
        assert_eq!(vm.trending.len(), PAGE_SIZE);
        assert_eq!(vm.trending.last().map(|m| m.id), Some(7));
    }

    #[test]
    fn missing_sets_default_to_empty() {
        let vm = decode_showcase(br#"{"data":{"hero":null,"popular":null,"action":{"media":null}}}"#).unwrap();
        assert_eq!(vm, ShowcaseViewModel::default());
    }

    #[test]
    fn absent_data_is_an_error() {
        let err = decode_showcase(br#"{"errors":[{"message":"Too Many Requests."}],"data":null}"#).unwrap_err();
        match err {
            FetchError::MissingData { messages } => assert_eq!(messages, vec!["Too Many Requests.".to_string()]),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(decode_showcase(b"{}"), Err(FetchError::MissingData { .. })));
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(matches!(decode_showcase(b"<html>502</html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn one_bad_set_rejects_the_whole_response() {
        let body = format!(
            r#"{{"data":{{"trending":{},"romance":{{"media":"oops"}}}}}}"#,
            page_json(0..3)
        );
        assert!(matches!(decode_showcase(body.as_bytes()), Err(FetchError::Decode(_))));
    }

    #[test]
    fn error_messages_are_listed() {
        let err = FetchError::MissingData { messages: vec!["a".into(), "b".into()] };
        assert_eq!(err.to_string(), "response has no data payload: a; b");
        let err = FetchError::MissingData { messages: vec![] };
        assert_eq!(err.to_string(), "response has no data payload");
    }
}
