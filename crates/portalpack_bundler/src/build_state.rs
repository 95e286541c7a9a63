/// Lifecycle of one `bundle_tag` call. There are no retries, a build ends in exactly one terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
  Idle,
  Collecting,
  Building,
  Succeeded,
  Failed,
}

impl BuildState {
  pub fn is_terminal(self) -> bool {
    matches!(self, Self::Succeeded | Self::Failed)
  }

  #[must_use]
  pub fn advance(self, next: Self, tag: &str) -> Self {
    debug_assert!(!self.is_terminal(), "a finished build can't move to {next:?}");
    tracing::debug!(tag, from = ?self, to = ?next, "build state");
    next
  }
}
