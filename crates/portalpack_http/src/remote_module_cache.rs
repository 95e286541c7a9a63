use std::sync::Arc;

use dashmap::DashMap;
use futures::{
  FutureExt,
  future::{BoxFuture, Shared},
};
use portalpack_error::BundleError;
use url::Url;

use crate::{HttpResponse, SharedHttpClient};

pub type FetchResult = Result<Arc<HttpResponse>, BundleError>;

type FetchOperation = Shared<BoxFuture<'static, FetchResult>>;

/// Remote modules keyed by absolute url.
///
/// The cache stores the fetch operation itself, so every caller asking for a url while it is in
/// flight awaits the same request, and every later caller gets its settled result. Failures are
/// kept as well; nothing is evicted unless [`RemoteModuleCache::invalidate`] or
/// [`RemoteModuleCache::clear`] is called.
pub struct RemoteModuleCache {
  http: SharedHttpClient,
  operations: DashMap<String, FetchOperation>,
}

impl RemoteModuleCache {
  pub fn new(http: SharedHttpClient) -> Self {
    Self { http, operations: DashMap::default() }
  }

  pub async fn fetch(&self, url: &Url) -> FetchResult {
    let operation = self
      .operations
      .entry(url.to_string())
      .or_insert_with(|| {
        let http = Arc::clone(&self.http);
        let url = url.clone();
        async move {
          tracing::debug!(%url, "fetching remote module");
          http.get(&url).await.map(Arc::new).map_err(|err| BundleError::Network {
            url: url.to_string(),
            message: format!("{err:#}"),
          })
        }
        .boxed()
        .shared()
      })
      .clone();

    operation.await
  }

  /// Forgets the operation for `url`, the next fetch goes to the network again.
  pub fn invalidate(&self, url: &str) -> bool {
    self.operations.remove(url).is_some()
  }

  pub fn clear(&self) {
    self.operations.clear();
  }

  pub fn len(&self) -> usize {
    self.operations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.operations.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use async_trait::async_trait;
  use portalpack_error::BundleError;
  use url::Url;

  use super::RemoteModuleCache;
  use crate::{HttpClient, HttpResponse};

  #[derive(Default)]
  struct CountingClient {
    requests: AtomicUsize,
  }

  #[async_trait]
  impl HttpClient for CountingClient {
    async fn get(&self, url: &Url) -> anyhow::Result<HttpResponse> {
      self.requests.fetch_add(1, Ordering::SeqCst);
      tokio::task::yield_now().await;
      if url.path().contains("missing") {
        anyhow::bail!("404 Not Found");
      }
      Ok(HttpResponse::new(format!("export default {:?};", url.as_str())))
    }
  }

  fn url(path: &str) -> Url {
    Url::parse("https://registry.test/").unwrap().join(path).unwrap()
  }

  #[tokio::test]
  async fn concurrent_fetches_share_one_request() {
    let client = Arc::new(CountingClient::default());
    let cache = RemoteModuleCache::new(Arc::clone(&client) as _);

    let (pkg_a, pkg_b) = (url("pkg"), url("pkg"));
    let (a, b) = futures::join!(cache.fetch(&pkg_a), cache.fetch(&pkg_b));
    assert_eq!(a.unwrap(), b.unwrap());
    cache.fetch(&url("pkg")).await.unwrap();

    assert_eq!(client.requests.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
  }

  #[tokio::test]
  async fn failures_stay_cached_until_invalidated() {
    let client = Arc::new(CountingClient::default());
    let cache = RemoteModuleCache::new(Arc::clone(&client) as _);
    let missing = url("missing");

    let err = cache.fetch(&missing).await.unwrap_err();
    assert_eq!(
      err,
      BundleError::Network {
        url: "https://registry.test/missing".to_string(),
        message: "404 Not Found".to_string()
      }
    );
    assert!(cache.fetch(&missing).await.is_err());
    assert_eq!(client.requests.load(Ordering::SeqCst), 1);

    assert!(cache.invalidate(missing.as_str()));
    assert!(cache.fetch(&missing).await.is_err());
    assert_eq!(client.requests.load(Ordering::SeqCst), 2);

    cache.clear();
    assert!(cache.is_empty());
  }
}
