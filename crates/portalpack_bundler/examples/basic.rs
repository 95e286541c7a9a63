use std::sync::Arc;

use arcstr::ArcStr;
use portalpack_bundler::{Bundler, BundlerOptions, ModuleType, Record, RecordSnapshot, ScriptPrefix};

fn record(tags: &[(&str, &str)]) -> Record {
  tags.iter().map(|&(tag, value)| (ArcStr::from(tag), ArcStr::from(value))).collect()
}

#[tokio::main]
async fn main() {
  let snapshot: RecordSnapshot = [
    (ArcStr::from("bot-2"), record(&[("main", "📖import { greet } from '📖greeting';\ngreet('bot-2');")])),
    (ArcStr::from("bot-1"), record(&[("greeting", "📖export const greet = (who) => console.log(`hi ${who}`);")])),
  ]
  .into_iter()
  .collect();

  let bundler = Bundler::new(BundlerOptions::default());
  let prefixes = [ScriptPrefix::new("📖", ModuleType::Js)];

  match bundler.bundle_tag(Arc::new(snapshot), "main", &prefixes).await {
    Some(bundle) => eprintln!("{}", bundle.source.or(bundle.error).unwrap_or_default()),
    None => eprintln!("no record has a `main` script"),
  }
}
