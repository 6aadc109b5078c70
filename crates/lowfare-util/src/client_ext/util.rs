use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

/// Build a [`reqwest::Client`] for one provider.
///
/// Each provider owns its client, and so its connection pool; `max_idle` caps the
/// connections kept alive per host.
pub fn build_client(timeout: Duration, max_idle: usize, headers: HeaderMap) -> Result<Client> {
    let client = reqwest::ClientBuilder::new()
        .timeout(timeout)
        .pool_max_idle_per_host(max_idle)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

pub trait ClientUtilExt {
    fn get_json<T, Q>(&self, url: &str, query: &Q) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send,
        Q: Serialize + ?Sized + Sync;
}

impl ClientUtilExt for Client {
    /// GET `url` with `query` as the query string, and deserialize the JSON body.
    ///
    /// Non-success status codes are errors, as are bodies that fail to deserialize. Failures are
    /// logged at `debug`; callers decide whether they matter.
    async fn get_json<T, Q>(&self, url: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned + Send,
        Q: Serialize + ?Sized + Sync,
    {
        trace!("GET {url}");
        let response = self
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                debug!("failed fetching response from {url}: {e}");
                e
            })?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        let de = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            debug!("failed deserializing from {url}: {e}");
            e
        })?;

        Ok(de)
    }
}
