use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
  pub body: String,
  /// Where the registry says the type declarations of this module live, possibly relative.
  pub type_declarations: Option<String>,
}

impl HttpResponse {
  pub fn new(body: impl Into<String>) -> Self {
    Self { body: body.into(), type_declarations: None }
  }

  #[must_use]
  pub fn with_type_declarations(mut self, hint: impl Into<String>) -> Self {
    self.type_declarations = Some(hint.into());
    self
  }

  /// The type declaration hint made absolute against the url this response was fetched from.
  pub fn type_declarations_url(&self, fetched_from: &Url) -> Option<Url> {
    self.type_declarations.as_deref().and_then(|hint| fetched_from.join(hint).ok())
  }
}

/// Performs `GET` requests for remote modules. Timeouts and retries are the implementation's concern.
#[async_trait]
pub trait HttpClient: Send + Sync + 'static {
  async fn get(&self, url: &Url) -> anyhow::Result<HttpResponse>;
}

pub type SharedHttpClient = Arc<dyn HttpClient>;

#[test]
fn type_declarations_are_joined_against_the_fetched_url() {
  let url = Url::parse("https://esm.sh/pkg@1.0.0/es2022/pkg.mjs").unwrap();
  let response = HttpResponse::new("").with_type_declarations("/pkg@1.0.0/index.d.ts");
  assert_eq!(
    response.type_declarations_url(&url).map(String::from).as_deref(),
    Some("https://esm.sh/pkg@1.0.0/index.d.ts")
  );
  assert_eq!(HttpResponse::new("").type_declarations_url(&url), None);
}
