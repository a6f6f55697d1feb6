use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Release index the latest-version check is resolved against.
pub const RELEASE_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/releases");

const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

pub struct ReleaseClient {
    client: Client,
    release_url: Url,
}

impl ReleaseClient {
    pub fn new() -> Result<Self> {
        Self::with_release_url(RELEASE_URL)
    }

    pub fn with_release_url(release_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        let release_url = Url::parse(release_url).context("Invalid release URL")?;

        Ok(Self {
            client,
            release_url,
        })
    }

    /// URL that redirects to the newest release tag.
    pub fn latest_url(&self) -> String {
        format!("{}/latest", self.release_url.as_str().trim_end_matches('/'))
    }

    /// Follows the `/latest` redirect and returns the tag it lands on.
    pub async fn latest_version(&self) -> Result<String> {
        let latest_url = self.latest_url();
        debug!("Checking latest release at {latest_url}");

        let response = self
            .client
            .get(latest_url.as_str())
            .send()
            .await
            .map_err(|e| {
                debug!("Release check failed: {e}");
                anyhow!("error found when check {latest_url}")
            })?;

        let version = tag_from_redirect(&self.release_url, response.url())
            .ok_or_else(|| anyhow!("redirect is incorrect when check {latest_url}"))?;

        info!("Latest release is {version}");
        Ok(version)
    }
}

/// Extracts the tag from the final URL of the `/latest` redirect chain.
///
/// The final URL must live on the release index's host, strictly below its
/// path, and must not be the `/latest` URL itself (no redirect happened).
pub fn tag_from_redirect(release_url: &Url, final_url: &Url) -> Option<String> {
    if final_url.scheme() != release_url.scheme()
        || final_url.host_str() != release_url.host_str()
        || final_url.port_or_known_default() != release_url.port_or_known_default()
    {
        return None;
    }

    let base_path = release_url.path().trim_end_matches('/');
    let rest = final_url.path().strip_prefix(base_path)?.strip_prefix('/')?;
    let rest = rest.trim_end_matches('/');

    if rest.is_empty() || rest == "latest" {
        return None;
    }

    rest.rsplit('/')
        .next()
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
}
