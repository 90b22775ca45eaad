//! GitHub Releases client: listing with pagination, exact-tag lookup, asset
//! download.
//!
//! Blocking reqwest client with static headers and `status().is_success()`
//! error mapping, plus host-scoped token attachment, rate-limit
//! classification, and Link-header pagination.

use super::api::{Asset, Release};
use invowk_errors::InvowkErrorKind;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Url;
use semver::Version;
use std::cmp::Reverse;

const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: u32 = 30;
const MAX_PAGES: u32 = 3;
const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

pub struct GithubClient {
    client: Client,
    base_host: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(base_host: impl Into<String>, token: Option<String>, user_agent: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );
        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_host: base_host.into(),
            token,
        }
    }

    /// Whether `url`'s host is trusted to receive the configured auth
    /// token: the configured API host, or `github.com` when the configured
    /// host is `api.github.com`.
    fn is_trusted_host(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        host == self.base_host || (self.base_host == "api.github.com" && host == "github.com")
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::blocking::RequestBuilder {
        let mut builder = self.client.request(method, url.clone());
        if let Some(token) = &self.token {
            if self.is_trusted_host(&url) {
                builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
            }
        }
        builder
    }

    fn classify_error(&self, response: Response, url: &Url) -> InvowkErrorKind {
        if let Some(rate_limit) = rate_limit_error(&response) {
            return rate_limit;
        }

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return InvowkErrorKind::ReleaseNotFound(sanitize_url(url));
        }

        InvowkErrorKind::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("github api error: status {status} for {}", sanitize_url(url)),
        ))
    }

    pub fn list_releases(&self, repo: &str) -> Result<Vec<Release>, InvowkErrorKind> {
        let mut releases = Vec::new();
        let mut url = Some(
            Url::parse(&format!(
                "https://{}/repos/{repo}/releases?per_page={PAGE_SIZE}",
                self.base_host
            ))
            .expect("constructed url is valid"),
        );

        for _ in 0..MAX_PAGES {
            let Some(current) = url.take() else { break };
            let response = self
                .request(reqwest::Method::GET, current.clone())
                .send()
                .map_err(|err| io_error(&err))?;

            if !response.status().is_success() {
                return Err(self.classify_error(response, &current));
            }

            let next = next_link(&response);
            let body = read_capped_body(response, &current)?;
            let page: Vec<Release> =
                serde_json::from_slice(&body).map_err(|err| io_error_msg(err.to_string()))?;
            releases.extend(page);
            url = next;
        }

        let mut stable: Vec<Release> = releases
            .into_iter()
            .filter(|release| !release.draft && !release.prerelease)
            .collect();

        // Stable sort by parsed semver descending; unparsable tags sort
        // last and preserve relative input order (stable sort, zero key).
        stable.sort_by_key(|release| {
            Reverse(
                Version::parse(release.tag_name.trim_start_matches('v'))
                    .map(|version| (version.major, version.minor, version.patch))
                    .unwrap_or((0, 0, 0)),
            )
        });

        Ok(stable)
    }

    pub fn get_release_by_tag(&self, repo: &str, tag: &str) -> Result<Release, InvowkErrorKind> {
        let url = Url::parse(&format!(
            "https://{}/repos/{repo}/releases/tags/{tag}",
            self.base_host
        ))
        .expect("constructed url is valid");

        let response = self
            .request(reqwest::Method::GET, url.clone())
            .send()
            .map_err(|err| io_error(&err))?;

        if !response.status().is_success() {
            return Err(self.classify_error(response, &url));
        }

        let body = read_capped_body(response, &url)?;
        serde_json::from_slice(&body).map_err(|err| io_error_msg(err.to_string()))
    }

    /// Returns the response for the caller to stream from; `reqwest`'s
    /// blocking `Response` implements `std::io::Read` directly.
    pub fn download_asset(&self, asset: &Asset) -> Result<Response, InvowkErrorKind> {
        let url = Url::parse(&asset.browser_download_url)
            .map_err(|err| io_error_msg(err.to_string()))?;

        let response = self
            .request(reqwest::Method::GET, url.clone())
            .send()
            .map_err(|err| io_error(&err))?;

        if !response.status().is_success() {
            return Err(self.classify_error(response, &url));
        }

        Ok(response)
    }
}

fn rate_limit_error(response: &Response) -> Option<InvowkErrorKind> {
    let remaining: u32 = response
        .headers()
        .get("X-RateLimit-Remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    if remaining != 0 {
        return None;
    }

    let limit = response
        .headers()
        .get("X-RateLimit-Limit")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    let reset_time = response
        .headers()
        .get("X-RateLimit-Reset")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    Some(InvowkErrorKind::RateLimitExceeded {
        limit,
        remaining,
        reset_time,
    })
}

fn next_link(response: &Response) -> Option<Url> {
    let header = response.headers().get(reqwest::header::LINK)?.to_str().ok()?;
    for part in header.split(',') {
        let mut segments = part.split(';');
        let url_part = segments.next()?.trim();
        let is_next = segments.any(|segment| segment.trim() == "rel=\"next\"");
        if is_next {
            let trimmed = url_part.trim_start_matches('<').trim_end_matches('>');
            return Url::parse(trimmed).ok();
        }
    }
    None
}

fn read_capped_body(response: Response, url: &Url) -> Result<Vec<u8>, InvowkErrorKind> {
    use std::io::Read;
    let mut reader = response.take(MAX_BODY_BYTES + 1);
    let mut body = Vec::new();
    reader.read_to_end(&mut body).map_err(InvowkErrorKind::Io)?;
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(io_error_msg(format!(
            "response body for {} exceeds {MAX_BODY_BYTES} bytes",
            sanitize_url(url)
        )));
    }
    Ok(body)
}

/// Strips the query string and fragment so error messages never echo
/// tokens or other sensitive query parameters.
fn sanitize_url(url: &Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.set_fragment(None);
    clean.to_string()
}

fn io_error(err: &reqwest::Error) -> InvowkErrorKind {
    io_error_msg(err.to_string())
}

fn io_error_msg(message: String) -> InvowkErrorKind {
    InvowkErrorKind::Io(std::io::Error::new(std::io::ErrorKind::Other, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trusted_host_matches_configured_base() {
        let client = GithubClient::new("api.github.com", Some("tok".to_string()), "invowk/1.0");
        let trusted = Url::parse("https://api.github.com/repos/acme/invowk/releases").unwrap();
        let also_trusted = Url::parse("https://github.com/acme/invowk/releases/download/x").unwrap();
        let untrusted = Url::parse("https://cdn.example.com/asset.tar.gz").unwrap();

        assert!(client.is_trusted_host(&trusted));
        assert!(client.is_trusted_host(&also_trusted));
        assert!(!client.is_trusted_host(&untrusted));
    }

    #[test]
    fn sanitize_url_strips_query_and_fragment() {
        let url = Url::parse("https://example.com/a?token=secret#frag").unwrap();
        assert_eq!(sanitize_url(&url), "https://example.com/a");
    }

    #[test]
    fn link_header_grammar_picks_rel_next_over_rel_last() {
        // Pins the Link-header parsing grammar `next_link` relies on
        // (reqwest's blocking `Response` can't be constructed without a
        // live connection, so this exercises the grammar directly).
        let header = "<https://api.github.com/repos/a/b/releases?page=2>; rel=\"next\", <https://api.github.com/repos/a/b/releases?page=5>; rel=\"last\"";
        let mut found = None;
        for part in header.split(',') {
            let mut segments = part.split(';');
            let url_part = segments.next().unwrap().trim();
            if segments.any(|segment| segment.trim() == "rel=\"next\"") {
                found = Some(url_part.trim_start_matches('<').trim_end_matches('>').to_string());
            }
        }
        assert_eq!(found.unwrap(), "https://api.github.com/repos/a/b/releases?page=2");
    }
}
