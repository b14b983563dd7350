// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP backend for the NGO API.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::wire::{Adoption, Animal, Donation};
use super::{FetchError, RecordSource};

pub struct RemoteApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("patinhas/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Http {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self { base_url, client })
    }

    /// Absolute URL of an API collection such as `adoptions`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint(path);
        debug!("GET {url}");

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Fetching {path}..."));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.fetch(&url);
        spinner.finish_and_clear();

        let body = result?;
        let list: Vec<T> = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            what: url.clone(),
            source,
        })?;

        info!("Fetched {} {path} from {}", list.len(), self.base_url);
        Ok(list)
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let http_err = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(http_err)
    }
}

impl RecordSource for RemoteApi {
    fn name(&self) -> &str {
        &self.base_url
    }

    fn adoptions(&self) -> Result<Vec<Adoption>, FetchError> {
        self.get_list("adoptions")
    }

    fn animals(&self) -> Result<Vec<Animal>, FetchError> {
        self.get_list("animals")
    }

    fn donations(&self) -> Result<Vec<Donation>, FetchError> {
        self.get_list("donations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> RemoteApi {
        RemoteApi::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            api("http://localhost:3000/").endpoint("adoptions"),
            "http://localhost:3000/adoptions"
        );
        assert_eq!(
            api("http://localhost:3000/api").endpoint("/donations"),
            "http://localhost:3000/api/donations"
        );
    }

    #[test]
    fn name_is_base_url() {
        assert_eq!(api("https://ong.example.org/api/").name(), "https://ong.example.org/api");
    }

    #[test]
    fn unreachable_host_is_http_error() {
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let err = api("http://127.0.0.1:9").donations().unwrap_err();
        assert!(matches!(err, FetchError::Http { .. }));
    }
}
