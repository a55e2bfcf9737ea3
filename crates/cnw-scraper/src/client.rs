use std::time::Duration;

use futures::future;
use reqwest::{Client, StatusCode};

use crate::types::Options;

/// One fetched page. Non-2xx statuses are ordinary results here;
/// interpreting them is the caller's job.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

// Grace period before the batch's connection pool is dropped.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

fn batch_client(options: &Options) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .user_agent(options.user_agent_header())
        .build()
}

async fn fetch_one(client: &Client, url: &str) -> Result<FetchResult, reqwest::Error> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    log::debug!("Fetched page: '{}' - {}", status.as_u16(), url);
    Ok(FetchResult {
        url: url.to_string(),
        status,
        body,
    })
}

/// Fetch every URL at once over one connection pool, letting each request
/// settle on its own. `results[i]` corresponds to `urls[i]` regardless of
/// completion order. The outer error covers client construction only.
pub async fn fetch_settled(
    options: &Options,
    urls: &[String],
) -> Result<Vec<Result<FetchResult, reqwest::Error>>, reqwest::Error> {
    if urls.is_empty() {
        return Ok(Vec::new());
    }
    log::debug!("Getting ({}) page(s)...", urls.len());
    let client = batch_client(options)?;
    let results = future::join_all(urls.iter().map(|url| fetch_one(&client, url))).await;
    // Let in-flight connections wind down before the pool drops.
    tokio::time::sleep(SETTLE_DELAY).await;
    Ok(results)
}

/// All-or-nothing batch: the first transport-level failure discards the
/// whole batch. Sibling requests still run to completion first.
pub async fn fetch_many(
    options: &Options,
    urls: &[String],
) -> Result<Vec<FetchResult>, reqwest::Error> {
    fetch_settled(options, urls).await?.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_options() -> Options {
        Options {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
            ..Options::default()
        }
    }

    #[tokio::test]
    async fn test_results_preserve_request_order() {
        let server = MockServer::start().await;

        // The first URL answers last; its result must still come first.
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("slow page")
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fast page"))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/slow", server.uri()),
            format!("{}/fast", server.uri()),
        ];
        let results = fetch_many(&test_options(), &urls).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, urls[0]);
        assert_eq!(results[0].body, "slow page");
        assert_eq!(results[1].body, "fast page");
    }

    #[tokio::test]
    async fn test_http_failures_are_ordinary_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let urls = vec![format!("{}/missing", server.uri())];
        let results = fetch_many(&test_options(), &urls).await.unwrap();

        assert_eq!(results[0].status.as_u16(), 404);
        assert_eq!(results[0].body, "not here");
    }

    #[tokio::test]
    async fn test_transport_error_discards_the_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/ok", server.uri()),
            "http://127.0.0.1:1/unreachable".to_string(),
        ];
        assert!(fetch_many(&test_options(), &urls).await.is_err());
    }

    #[tokio::test]
    async fn test_settled_variant_keeps_partial_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/ok", server.uri()),
            "http://127.0.0.1:1/unreachable".to_string(),
        ];
        let results = fetch_settled(&test_options(), &urls).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().body, "fine");
        assert!(results[1].is_err());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = fetch_many(&test_options(), &[]).await.unwrap();
        assert!(results.is_empty());
    }
}
