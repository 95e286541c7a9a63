use async_trait::async_trait;
use url::Url;

use crate::{HttpClient, HttpResponse};

pub const TYPE_DECLARATIONS_HEADER: &str = "x-typescript-types";

#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
  client: reqwest::Client,
}

impl ReqwestClient {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_client(client: reqwest::Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl HttpClient for ReqwestClient {
  async fn get(&self, url: &Url) -> anyhow::Result<HttpResponse> {
    let response = self.client.get(url.clone()).send().await?.error_for_status()?;
    let type_declarations = response
      .headers()
      .get(TYPE_DECLARATIONS_HEADER)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string);
    let body = response.text().await?;
    Ok(HttpResponse { body, type_declarations })
  }
}
