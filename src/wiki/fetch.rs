// src/wiki/fetch.rs
// =============================================================================
// This module fetches rendered article HTML from the MediaWiki API.
//
// Strategy:
// - Call action=parse with prop=text, which returns the article body as
//   ready-to-display HTML inside JSON: {"parse": {"text": {"*": "<div>..."}}}
// - Follow redirects on the server side (redirects=1), so "USA" gives the
//   "United States" article
// - Anything that isn't a successful parse is "page not found"
//
// Rust concepts:
// - serde: Deserialize JSON straight into structs
// - Option<String>: "found" vs "not found" without an error
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

/// API endpoint, `{lang}` is replaced with the language code
pub const DEFAULT_API_TEMPLATE: &str = "https://{lang}.wikipedia.org/w/api.php";

/// Wikimedia asks API clients to identify themselves
pub const API_USER_AGENT: &str = concat!("wiki-export/", env!("CARGO_PKG_VERSION"));

// Shape of the action=parse response
//
// Only the fields we read are declared; serde ignores the rest.
#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedPage>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    text: Option<ParsedText>,
}

#[derive(Debug, Deserialize)]
struct ParsedText {
    // The legacy JSON format stores the HTML under the key "*"
    #[serde(rename = "*")]
    html: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

// Client for one MediaWiki installation (per language)
pub struct WikiClient {
    client: Client,
    api_template: String,
}

impl WikiClient {
    pub fn new(api_template: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_template: api_template.to_string(),
        })
    }

    // The api.php URL for a language edition
    //
    // Example:
    //   "de" -> "https://de.wikipedia.org/w/api.php"
    pub fn api_url(&self, lang: &str) -> String {
        self.api_template.replace("{lang}", lang)
    }

    // Fetches the rendered HTML of a page
    //
    // Returns:
    //   Ok(Some(html)) = the page exists
    //   Ok(None)       = missing page, API error or unexpected response
    //   Err            = the request itself failed (DNS, connection, ...)
    pub async fn fetch_article(&self, title: &str, lang: &str) -> Result<Option<String>> {
        let url = self.api_url(lang);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "parse"),
                ("format", "json"),
                ("page", title),
                ("prop", "text"),
                ("redirects", "1"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            tracing::debug!(title, status = %response.status(), "parse request rejected");
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response for '{}'", title))?;

        Ok(extract_html(title, &body))
    }
}

// Pulls parse.text.* out of a response body
fn extract_html(title: &str, body: &str) -> Option<String> {
    let parsed: ParseResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(title, error = %e, "unparsable API response");
            return None;
        }
    };

    if let Some(error) = parsed.error {
        tracing::debug!(title, code = %error.code, info = %error.info, "API returned an error");
        return None;
    }

    parsed.parse.and_then(|page| page.text).map(|text| text.html)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(rename = "*")] do?
//    - Rust field names can't be "*", so we call the field `html`
//    - rename tells serde which JSON key fills it
//
// 2. Why Option fields in ParseResponse?
//    - A successful response has "parse", a failed one has "error"
//    - Declaring both as Option lets one struct decode either shape
//
// 3. What is concat!/env!?
//    - Compile-time macros: env!("CARGO_PKG_VERSION") is the version from
//      Cargo.toml, concat! glues string literals together
//    - The result is a &'static str, so it can be a const
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WikiClient {
        let template = format!("{}/{{lang}}/api.php", server.uri());
        WikiClient::new(&template, API_USER_AGENT).unwrap()
    }

    #[test]
    fn test_api_url_substitutes_language() {
        let client = WikiClient::new(DEFAULT_API_TEMPLATE, API_USER_AGENT).unwrap();
        assert_eq!(client.api_url("en"), "https://en.wikipedia.org/w/api.php");
        assert_eq!(client.api_url("de"), "https://de.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_extract_html_success() {
        let body = r#"{"parse":{"title":"Dog","pageid":4269567,"text":{"*":"<p>Woof</p>"}}}"#;
        assert_eq!(extract_html("Dog", body).as_deref(), Some("<p>Woof</p>"));
    }

    #[test]
    fn test_extract_html_missing_title() {
        let body = r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist."}}"#;
        assert_eq!(extract_html("Nope", body), None);
    }

    #[test]
    fn test_extract_html_without_text_or_garbage() {
        assert_eq!(extract_html("Dog", r#"{"parse":{"title":"Dog"}}"#), None);
        assert_eq!(extract_html("Dog", "<html>not json</html>"), None);
    }

    #[tokio::test]
    async fn test_fetch_article_sends_parse_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/de/api.php"))
            .and(query_param("action", "parse"))
            .and(query_param("format", "json"))
            .and(query_param("page", "C/C++"))
            .and(query_param("prop", "text"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"parse":{"title":"C/C++","text":{"*":"<p>Sprachen</p>"}}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let html = client_for(&server).fetch_article("C/C++", "de").await.unwrap();
        assert_eq!(html.as_deref(), Some("<p>Sprachen</p>"));
    }

    #[tokio::test]
    async fn test_fetch_article_http_error_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let html = client_for(&server).fetch_article("Dog", "en").await.unwrap();
        assert_eq!(html, None);
    }
}
