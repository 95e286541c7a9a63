mod http_client;
#[cfg(feature = "client")]
mod reqwest_client;
mod remote_module_cache;

pub use crate::{
  http_client::{HttpClient, HttpResponse, SharedHttpClient},
  remote_module_cache::RemoteModuleCache,
};
#[cfg(feature = "client")]
pub use reqwest_client::{ReqwestClient, TYPE_DECLARATIONS_HEADER};
pub use url::Url;
