use std::path::PathBuf;

use clap::Args;

use crate::types::prefix_arg::{PrefixArg, parse_prefix};

#[derive(Args)]
pub struct InputArgs {
  /// JSON file mapping record ids to their tags.
  #[clap(long, short)]
  pub snapshot: PathBuf,

  /// The entry tag, optionally starting with a marker.
  #[clap(long, short)]
  pub tag: String,

  /// A script marker, tried in the order given. Defaults to `📖=js`.
  #[clap(long = "prefix", value_name = "MARKER=LANG", value_parser = parse_prefix, action = clap::ArgAction::Append)]
  pub prefixes: Vec<PrefixArg>,

  /// A marker that loads any non-empty tag value as is. Tried after every `--prefix`.
  #[clap(long = "fallback-prefix", value_name = "MARKER=LANG", value_parser = parse_prefix, action = clap::ArgAction::Append)]
  pub fallback_prefixes: Vec<PrefixArg>,

  /// JSON file with a list of libraries to register before bundling.
  #[clap(long)]
  pub library: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'o')]
  pub out: Option<PathBuf>,

  /// Print the whole result as JSON instead of the bundle source.
  #[clap(long)]
  pub json: bool,
}

#[derive(Args)]
pub struct EnhanceArgs {
  #[clap(long, env = "PORTALPACK_REGISTRY")]
  pub registry: Option<String>,

  #[clap(long)]
  pub types_marker: Option<String>,

  #[clap(long, short = 'm')]
  pub minify: bool,
}
