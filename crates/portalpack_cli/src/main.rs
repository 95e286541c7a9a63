mod args;
mod snapshot;
mod types;

use std::{fs, process::ExitCode, sync::Arc, time::Instant};

use ansi_term::Colour;
use anyhow::Context;
use args::{EnhanceArgs, InputArgs, OutputArgs};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use portalpack_bundler::{Bundler, BundlerOptions, CodeBundle, ModuleType, ScriptPrefix};

use crate::{
  snapshot::{read_libraries, read_snapshot},
  types::prefix_arg::PrefixArg,
};

#[derive(Parser)]
#[command(version, about = "Bundle the scripts stored under one tag of a record snapshot", long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env("PORTALPACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn script_prefixes(prefixes: Vec<PrefixArg>, fallback_prefixes: Vec<PrefixArg>) -> Vec<ScriptPrefix> {
  let mut script_prefixes = prefixes
    .into_iter()
    .map(|arg| ScriptPrefix::new(arg.marker, ModuleType::from(arg.language)))
    .collect::<Vec<_>>();
  if script_prefixes.is_empty() {
    script_prefixes.push(ScriptPrefix::new("📖", ModuleType::Js));
  }
  script_prefixes.extend(
    fallback_prefixes
      .into_iter()
      .map(|arg| ScriptPrefix::fallback(arg.marker, ModuleType::from(arg.language))),
  );
  script_prefixes
}

fn print_summary(bundle: &CodeBundle, out: &str, source: &str) {
  let dim = Colour::White.dimmed();
  let size = format!("{:.2}", source.len() as f64 / 1024.0);
  println!(
    "{}{} {}{} kB",
    dim.paint("<OUT>/"),
    Colour::Cyan.paint(out),
    dim.paint("│ size: "),
    size
  );
  println!(
    "{}",
    dim.paint(format!(
      "{} records, {} externals, {} libraries",
      bundle.modules.len(),
      bundle.externals.len(),
      bundle.libraries.len()
    ))
  );
}

async fn run(args: Commands) -> anyhow::Result<ExitCode> {
  let InputArgs { snapshot, tag, prefixes, fallback_prefixes, library } = args.input;
  let snapshot = read_snapshot(&snapshot)?;
  let prefixes = script_prefixes(prefixes, fallback_prefixes);

  let bundler = Bundler::new(BundlerOptions {
    registry_url: args.enhance.registry,
    type_declarations_marker: args.enhance.types_marker,
    minify: Some(args.enhance.minify),
  });
  if let Some(path) = library {
    for module in read_libraries(&path)? {
      bundler.add_library(module);
    }
  }

  let start = Instant::now();
  let Some(bundle) = bundler.bundle_tag(Arc::new(snapshot), &tag, &prefixes).await else {
    eprintln!("{} no record has a script under {tag:?}", Colour::Yellow.paint("Nothing to bundle:"));
    return Ok(ExitCode::SUCCESS);
  };
  let exit_code = if bundle.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE };

  if args.output.json {
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    return Ok(exit_code);
  }

  for warning in &bundle.warnings {
    eprintln!("{} {}", Colour::Yellow.paint("Warning:"), warning);
  }

  match (&bundle.source, &bundle.error) {
    (Some(source), _) => {
      match &args.output.out {
        Some(path) => {
          fs::write(path, source).with_context(|| format!("Failed to write {}", path.display()))?;
          print_summary(&bundle, &path.display().to_string(), source);
        }
        None => println!("{source}"),
      }
      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      eprintln!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
    }
    (None, error) => {
      eprintln!("{} {}", Colour::Red.paint("Error:"), error.as_deref().unwrap_or_default());
    }
  }

  Ok(exit_code)
}

#[tokio::main]
async fn main() -> ExitCode {
  init_tracing();

  match run(Commands::parse()).await {
    Ok(exit_code) => exit_code,
    Err(err) => {
      eprintln!("{} {err:#}", Colour::Red.paint("Error:"));
      ExitCode::FAILURE
    }
  }
}
