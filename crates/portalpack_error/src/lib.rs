mod bundle_error;

use std::{
  fmt::{self, Display},
  ops::{Deref, DerefMut},
};

pub use crate::bundle_error::BundleError;

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// All error messages, sorted so the text does not depend on the order tasks finished in.
  pub fn to_message(&self) -> String {
    let mut messages = self.0.iter().map(|error| format!("{error:#}")).collect::<Vec<_>>();
    messages.sort();
    messages.dedup();
    messages.join("\n")
  }
}

impl Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_message())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<BundleError> for BuildError {
  fn from(error: BundleError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn build_error_message_is_sorted() {
  let error = BuildError(vec![anyhow::anyhow!("b failed"), anyhow::anyhow!("a failed")]);
  assert_eq!(error.to_message(), "a failed\nb failed");
}
