use portalpack_common::{EngineOptions, NormalizedEngineOptions};

pub fn normalize_options(raw_options: EngineOptions) -> NormalizedEngineOptions {
  NormalizedEngineOptions {
    input: raw_options.input.unwrap_or_default(),
    minify: raw_options.minify.unwrap_or(false),
    silent: raw_options.silent.unwrap_or(false),
  }
}
