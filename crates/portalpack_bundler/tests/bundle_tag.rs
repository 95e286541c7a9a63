use std::{
  collections::HashMap,
  process::Command,
  sync::{Arc, Mutex},
};

use arcstr::ArcStr;
use async_trait::async_trait;
use portalpack_bundler::{
  Bundler, BundlerOptions, CodeBundle, HttpClient, HttpResponse, LibraryModule, ModuleType, Record,
  RecordSnapshot, ScriptPrefix, Url,
};

const REGISTRY: &str = "https://registry.test";

#[derive(Default)]
struct RecordingClient {
  responses: HashMap<String, HttpResponse>,
  requests: Mutex<Vec<String>>,
}

impl RecordingClient {
  fn with(responses: &[(&str, HttpResponse)]) -> Arc<Self> {
    let responses = responses.iter().map(|(url, response)| ((*url).to_string(), response.clone())).collect();
    Arc::new(Self { responses, requests: Mutex::default() })
  }

  fn requests(&self) -> Vec<String> {
    self.requests.lock().unwrap().clone()
  }
}

#[async_trait]
impl HttpClient for RecordingClient {
  async fn get(&self, url: &Url) -> anyhow::Result<HttpResponse> {
    self.requests.lock().unwrap().push(url.to_string());
    tokio::task::yield_now().await;
    self.responses.get(url.as_str()).cloned().ok_or_else(|| anyhow::anyhow!("404 Not Found"))
  }
}

fn bundler(client: &Arc<RecordingClient>) -> Bundler {
  let options = BundlerOptions { registry_url: Some(REGISTRY.to_string()), ..Default::default() };
  Bundler::with_http_client(options, Arc::clone(client) as _)
}

fn snapshot(records: &[(&str, &str, &str)]) -> Arc<RecordSnapshot> {
  let mut by_id = HashMap::<ArcStr, Record>::new();
  for &(record_id, tag, value) in records {
    by_id.entry(ArcStr::from(record_id)).or_default().insert(ArcStr::from(tag), ArcStr::from(value));
  }
  Arc::new(by_id.into_iter().collect())
}

fn prefixes() -> Vec<ScriptPrefix> {
  vec![
    ScriptPrefix::new("📖", ModuleType::Js).with_default(true),
    ScriptPrefix::new("🔷", ModuleType::Ts),
    ScriptPrefix::fallback("📝", ModuleType::Text),
  ]
}

async fn bundle(bundler: &Bundler, snapshot: Arc<RecordSnapshot>, tag: &str) -> CodeBundle {
  bundler.bundle_tag(snapshot, tag, &prefixes()).await.expect("some record should match")
}

fn source(bundle: &CodeBundle) -> &str {
  bundle.source.as_deref().unwrap_or_else(|| panic!("build failed: {:?}", bundle.error))
}

/// Runs `code` with node and returns what it printed, or `None` when node is not installed.
fn run_with_node(code: &str) -> Option<String> {
  let output = Command::new("node").arg("-e").arg(code).output().ok()?;
  assert!(output.status.success(), "node failed:\n{}", String::from_utf8_lossy(&output.stderr));
  Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn run_bundle(bundle: &CodeBundle) -> Option<String> {
  let code = format!(
    "globalThis.runs = [];\n{}\nconsole.log(globalThis.runs.join(','));",
    source(bundle)
  );
  run_with_node(&code)
}

fn position(code: &str, needle: &str) -> usize {
  code.find(needle).unwrap_or_else(|| panic!("{needle:?} not found in\n{code}"))
}

#[tokio::test]
async fn repeated_builds_are_identical() {
  let client = RecordingClient::with(&[(
    "https://registry.test/pkg?dts",
    HttpResponse::new("export const pkg = 1;").with_type_declarations("/pkg.d.ts"),
  )]);
  let bundler = bundler(&client);
  let snapshot = snapshot(&[
    ("b", "main", "📖import { pkg } from 'pkg';\nconsole.log(pkg);"),
    ("a", "main", "🔷const n: number = 1;\nconsole.log(n);"),
  ]);

  let first = bundle(&bundler, Arc::clone(&snapshot), "main").await;
  let second = bundle(&bundler, snapshot, "main").await;
  assert!(first.is_ok());
  assert_eq!(first, second);
  assert_eq!(client.requests().len(), 1);
}

#[tokio::test]
async fn entries_run_in_record_id_order() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let snapshot = snapshot(&[("b", "main", "📖f();"), ("a", "main", "📖g();")]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  let code = source(&bundle);
  assert!(position(code, "g();") < position(code, "f();"));
  assert!(
    position(code, "__portal_require(\"portal-tag:📖a.main?portal-tag\")")
      < position(code, "__portal_require(\"portal-tag:📖b.main?portal-tag\")")
  );
}

#[tokio::test]
async fn no_matching_record_is_none() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let snapshot = snapshot(&[("a", "main", "plain text"), ("b", "other", "📖f();")]);

  assert_eq!(bundler.bundle_tag(Arc::clone(&snapshot), "main", &prefixes()).await, None);
  assert_eq!(bundler.bundle_tag(snapshot, "missing", &prefixes()).await, None);
}

#[tokio::test]
async fn imported_tags_run_first_without_network() {
  let client = RecordingClient::with(&[]);
  let bundler = bundler(&client);
  let snapshot = snapshot(&[
    ("a", "main", "📖import '📖other';\nrunMain();"),
    ("b", "other", "📖runOther();"),
  ]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  let code = source(&bundle);
  assert!(position(code, "runOther();") < position(code, "runMain();"));
  assert!(client.requests().is_empty());

  let modules = bundle
    .modules
    .iter()
    .map(|(record, tags)| (record.as_str(), tags.iter().map(ArcStr::as_str).collect::<Vec<_>>()))
    .collect::<Vec<_>>();
  assert_eq!(modules, vec![("a", vec!["main"]), ("b", vec!["other"])]);
}

#[tokio::test]
async fn circular_tags_build_once_each() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let snapshot = snapshot(&[
    ("a", "main", "📖import { other } from '📖other';\nexport const main = () => other();"),
    ("b", "other", "📖import { main } from '📖main';\nexport const other = () => 'other';\nexport { main };"),
  ]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  let code = source(&bundle);
  assert_eq!(code.matches("__portal_define(\"portal-tag:📖a.main?portal-tag\"").count(), 1);
  assert_eq!(code.matches("__portal_define(\"portal-tag:📖b.other?portal-tag\"").count(), 1);
  assert_eq!(
    bundle.warnings,
    vec![
      "Circular dependency: portal-tag:📖a.main?portal-tag -> portal-tag:📖b.other?portal-tag -> portal-tag:📖a.main?portal-tag."
    ]
  );
}

#[tokio::test]
async fn bare_imports_are_fetched_once() {
  let client = RecordingClient::with(&[(
    "https://registry.test/pkg?dts",
    HttpResponse::new("export default 1;").with_type_declarations("/pkg@1.0.0/index.d.ts"),
  )]);
  let bundler = bundler(&client);
  let snapshot = snapshot(&[
    ("a", "main", "📖import pkg from 'pkg';\nconsole.log(pkg);"),
    ("b", "main", "📖import pkg from 'pkg';\nconsole.log(pkg + 1);"),
  ]);

  let (first, second) = tokio::join!(
    bundle(&bundler, Arc::clone(&snapshot), "main"),
    bundle(&bundler, Arc::clone(&snapshot), "main")
  );
  assert!(first.is_ok() && second.is_ok());
  assert_eq!(client.requests(), vec!["https://registry.test/pkg?dts"]);

  let external = &first.externals["pkg"];
  assert_eq!(external.url, "https://registry.test/pkg?dts");
  assert_eq!(
    external.typescript_definitions_url.as_deref(),
    Some("https://registry.test/pkg@1.0.0/index.d.ts")
  );
}

#[tokio::test]
async fn relative_remote_imports_follow_urls() {
  let client = RecordingClient::with(&[
    ("https://registry.test/pkg?dts", HttpResponse::new("export * from './x';")),
    ("https://registry.test/pkg/x", HttpResponse::new("export * from '../y';\nexport * from '/z';")),
    ("https://registry.test/y", HttpResponse::new("export const y = 1;")),
    ("https://registry.test/z", HttpResponse::new("export const z = 1;")),
  ]);
  let bundler = bundler(&client);
  let snapshot = snapshot(&[("a", "main", "📖import { y, z } from 'pkg';\nconsole.log(y, z);")]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  source(&bundle);

  let mut requests = client.requests();
  requests.sort();
  assert_eq!(
    requests,
    vec![
      "https://registry.test/pkg/x",
      "https://registry.test/pkg?dts",
      "https://registry.test/y",
      "https://registry.test/z",
    ]
  );
  assert_eq!(bundle.externals.keys().map(ArcStr::as_str).collect::<Vec<_>>(), vec!["pkg"]);
}

#[tokio::test]
async fn libraries_shadow_exact_ids() {
  let client = RecordingClient::with(&[(
    "https://registry.test/lodash/fp?dts",
    HttpResponse::new("export const map = () => [];"),
  )]);
  let bundler = bundler(&client);
  bundler.add_library(LibraryModule::new("lodash", "export default { injected: true };", ModuleType::Js));
  let snapshot = snapshot(&[(
    "a",
    "main",
    "📖import _ from 'lodash';\nimport { map } from 'lodash/fp';\nconsole.log(_, map);",
  )]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  assert!(source(&bundle).contains("injected: true"));
  assert_eq!(client.requests(), vec!["https://registry.test/lodash/fp?dts"]);
  assert_eq!(bundle.libraries.keys().map(ArcStr::as_str).collect::<Vec<_>>(), vec!["lodash"]);
  assert_eq!(bundle.externals.keys().map(ArcStr::as_str).collect::<Vec<_>>(), vec!["lodash/fp"]);
}

#[tokio::test]
async fn fallback_imports_load_verbatim() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let snapshot = snapshot(&[
    ("a", "main", "📖import note from '📝notes';\nconsole.log(note);"),
    ("b", "notes", ""),
    ("c", "notes", "📝kept as is"),
    ("d", "notes", "ignored"),
  ]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  let code = source(&bundle);
  assert!(code.contains("var __portal_default = \"📝kept as is\";"));
  assert!(!code.contains("ignored"));
  assert!(!code.contains("📖import"));
  assert!(bundle.modules.contains_key("c"));
  assert!(!bundle.modules.contains_key("d"));
}

#[tokio::test]
async fn failures_keep_the_partial_report() {
  let client = RecordingClient::with(&[("https://registry.test/pkg?dts", HttpResponse::new("export default 1;"))]);
  let bundler = bundler(&client);
  let snapshot = snapshot(&[
    ("a", "main", "📖import pkg from 'pkg';\nconsole.log(pkg);"),
    ("b", "main", "📖let = ;"),
  ]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  assert_eq!(bundle.source, None);
  let error = bundle.error.as_deref().unwrap();
  assert!(error.contains("Failed to compile \"portal-tag:📖b.main?portal-tag\""), "{error}");
  assert!(bundle.modules.contains_key("a") && bundle.modules.contains_key("b"));
  assert!(bundle.externals.contains_key("pkg"));
  assert!(bundle.warnings.is_empty());
}

#[tokio::test]
async fn unresolved_modules_fail_the_build() {
  let bundler = bundler(&RecordingClient::with(&[]));

  let missing_tag = bundle(&bundler, snapshot(&[("a", "main", "📖import '📖missing';")]), "main").await;
  assert!(missing_tag.error.unwrap().contains("📖missing"));

  let relative = bundle(&bundler, snapshot(&[("a", "main", "📖import './x.js';")]), "main").await;
  assert!(relative.error.unwrap().contains("relative imports need a URL importer"));

  let offline = bundle(&bundler, snapshot(&[("a", "main", "📖import 'nowhere';")]), "main").await;
  let error = offline.error.unwrap();
  assert!(error.contains("Failed to fetch \"https://registry.test/nowhere?dts\": 404 Not Found"), "{error}");
  assert!(offline.externals.contains_key("nowhere"));
}

#[tokio::test]
async fn marked_entry_tag_selects_one_language() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let snapshot = snapshot(&[("a", "main", "📖jsMain();"), ("b", "main", "🔷tsMain();")]);

  let bundle = bundle(&bundler, snapshot, "🔷main").await;
  let code = source(&bundle);
  assert!(code.contains("tsMain();"));
  assert!(!code.contains("jsMain();"));
  assert_eq!(bundle.tag, "🔷main");
}

#[tokio::test]
async fn circular_tags_execute_once_each() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let snapshot = snapshot(&[
    ("a", "main", "📖import { other } from '📖other';\nglobalThis.runs.push('main:' + other());"),
    (
      "b",
      "other",
      "📖import '📖main';\nglobalThis.runs.push('other');\nexport function other() { return 'ok'; }",
    ),
  ]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  let code = source(&bundle);
  assert_eq!(code.matches("globalThis.runs.push('other');").count(), 1);
  assert_eq!(code.matches("globalThis.runs.push('main:'").count(), 1);
  if let Some(printed) = run_bundle(&bundle) {
    assert_eq!(printed, "other,main:ok");
  }
}

#[tokio::test]
async fn anonymous_default_functions_are_callable_inside_cycles() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let snapshot = snapshot(&[
    ("a", "main", "📖import '📖other';\nexport default function () { return 'hoisted'; }"),
    ("b", "other", "📖import run from '📖main';\nglobalThis.runs.push(run());"),
  ]);

  let bundle = bundle(&bundler, snapshot, "main").await;
  assert!(source(&bundle).contains("__portal_default() { return 'hoisted'; }"));
  if let Some(printed) = run_bundle(&bundle) {
    assert_eq!(printed, "hoisted");
  }
}

#[tokio::test]
async fn top_level_await_is_a_compile_error() {
  let snapshot = snapshot(&[("a", "main", "📖await Promise.resolve();\nconsole.log('tla ok');")]);
  let mut errors = Vec::new();
  for minify in [false, true] {
    let options = BundlerOptions {
      registry_url: Some(REGISTRY.to_string()),
      minify: Some(minify),
      ..Default::default()
    };
    let bundler = Bundler::with_http_client(options, RecordingClient::with(&[]) as _);
    let bundle = bundle(&bundler, Arc::clone(&snapshot), "main").await;
    assert_eq!(bundle.source, None);
    errors.push(bundle.error.unwrap());
  }

  assert!(
    errors[0].starts_with(
      "Failed to compile \"portal-tag:📖a.main?portal-tag\": Top-level await is not supported"
    ),
    "{}",
    errors[0]
  );
  assert_eq!(errors[0], errors[1]);
}

#[tokio::test]
async fn record_ids_may_extend_a_marker_or_contain_dots() {
  let bundler = bundler(&RecordingClient::with(&[]));
  let prefixes =
    vec![ScriptPrefix::new("#!", ModuleType::Ts), ScriptPrefix::new("#", ModuleType::Js)];
  let snapshot = snapshot(&[
    ("!a", "main", "#console.log(1);"),
    ("v1.2", "main", "#import '#helper';\ndotted();"),
    ("x.y", "helper", "#helper();"),
  ]);

  let bundle = bundler.bundle_tag(snapshot, "main", &prefixes).await.unwrap();
  let code = source(&bundle);
  assert!(code.contains("console.log(1);"));
  assert!(position(code, "helper();") < position(code, "dotted();"));
  assert_eq!(
    bundle.modules.keys().map(ArcStr::as_str).collect::<Vec<_>>(),
    vec!["!a", "v1.2", "x.y"]
  );
}
