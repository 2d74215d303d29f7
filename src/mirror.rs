use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, ACCEPT},
    StatusCode,
};
use select::{document::Document, predicate::Name};
use thiserror::Error;

pub const DEFAULT_MIRROR_LIST_URL: &str = "https://files.kde.org/last-updated.mirrorlist";

/// `KDELinux/<tool> <version> (<os>; <arch>)`, the platform standing in for a runtime version.
fn user_agent() -> String {
    format!(
        "KDELinux/{} {} ({}; {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

#[derive(Debug, Error)]
pub enum MirrorListError {
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
    #[error("failed to fetch mirror list from `{url}`")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("mirror list request to `{url}` returned {status}")]
    Status { url: String, status: StatusCode },
    /// Either nothing is mirrored or the page layout changed.
    #[error("mirror list at `{url}` contains no mirrors")]
    Empty { url: String },
}

#[derive(Debug)]
pub struct MirrorLister {
    url: String,
    client: Client,
}

impl MirrorLister {
    pub fn new(url: impl Into<String>) -> Result<Self, MirrorListError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

        let client = Client::builder()
            .user_agent(user_agent())
            .default_headers(headers)
            .build()
            .map_err(MirrorListError::Client)?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Fetches the mirror list page and returns the mirror base urls in page order.
    pub fn list(&self) -> Result<Vec<String>, MirrorListError> {
        tracing::info!(url = %self.url, "fetching mirror list");

        let fetch_err = |source| MirrorListError::Fetch {
            url: self.url.clone(),
            source,
        };

        let response = self.client.get(&self.url).send().map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(MirrorListError::Status {
                url: self.url.clone(),
                status,
            });
        }
        let body = response.text().map_err(fetch_err)?;

        let mirrors = parse_mirror_list(&body);
        if mirrors.is_empty() {
            return Err(MirrorListError::Empty {
                url: self.url.clone(),
            });
        }

        tracing::info!(count = mirrors.len(), "found mirrors");
        Ok(mirrors)
    }
}

/// Extracts the `href` of every anchor in document order and keeps the mirror directories.
pub fn parse_mirror_list(html: &str) -> Vec<String> {
    Document::from(html)
        .find(Name("a"))
        .filter_map(|node| node.attr("href"))
        .filter(|href| {
            let keep = is_mirror_url(href);
            if keep {
                tracing::debug!(%href, "accepted mirror");
            } else {
                tracing::trace!(%href, "skipped link");
            }
            keep
        })
        .map(str::to_owned)
        .collect()
}

fn is_mirror_url(href: &str) -> bool {
    !href.contains("last-updated") && href != "/" && href.ends_with('/')
}
