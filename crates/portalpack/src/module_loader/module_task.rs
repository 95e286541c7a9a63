use std::sync::Arc;

use futures::future::join_all;
use oxc_index::IndexVec;
use portalpack_common::{
  ImportRecordIdx, ModuleIdx, ModuleLoaderMsg, NormalModuleTaskResult, RawImportRecord, ResolvedId,
};
use portalpack_error::{BuildResult, BundleError};
use portalpack_plugin::{HookLoadArgs, HookLoadOutput};

use crate::{
  scan_stage::ast_scanner::{AstScanner, ScanResult},
  utils::{parse_to_ecma_ast::parse_to_ecma_ast, resolve_id::resolve_id},
};

use super::task_context::TaskContext;

/// Loads, parses and scans one module, then resolves everything it imports.
///
/// A task always sends exactly one message back to the loader, either the finished module or the
/// errors that stopped it.
pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  resolved_id: ResolvedId,
}

impl ModuleTask {
  pub fn new(ctx: Arc<TaskContext>, idx: ModuleIdx, resolved_id: ResolvedId) -> Self {
    Self { ctx, idx, resolved_id }
  }

  pub async fn run(self) {
    let msg = match self.run_inner().await {
      Ok(result) => ModuleLoaderMsg::NormalModuleDone(Box::new(result)),
      Err(errs) => ModuleLoaderMsg::BuildErrors(errs.0),
    };
    self.ctx.tx.send(msg).await.expect("Send should not fail");
  }

  async fn run_inner(&self) -> BuildResult<NormalModuleTaskResult> {
    let stable_id = self.resolved_id.stable_id();

    let load_args =
      HookLoadArgs { id: &self.resolved_id.id, namespace: &self.resolved_id.namespace };
    let Some(HookLoadOutput { code, module_type }) = self.ctx.plugin.load(&load_args).await? else {
      return Err(anyhow::anyhow!("No plugin could load {stable_id:?}").into());
    };

    if !self.ctx.options.silent {
      tracing::trace!(module = %stable_id, %module_type, "loaded");
    }

    let ast = parse_to_ecma_ast(&stable_id, code, module_type)?;
    let ScanResult { import_records, imports, top_level_await } =
      AstScanner::new().scan(ast.program());
    if let Some(span) = top_level_await {
      return Err(
        BundleError::Compile {
          module: stable_id,
          message: format!(
            "Top-level await is not supported (at offset {}): move it into an async function",
            span.start
          ),
        }
        .into(),
      );
    }
    let resolved_deps = self.resolve_dependencies(&import_records).await?;

    Ok(NormalModuleTaskResult {
      module_idx: self.idx,
      resolved_id: self.resolved_id.clone(),
      module_type,
      ast,
      raw_import_records: import_records,
      imports,
      resolved_deps,
      warnings: Vec::new(),
    })
  }

  async fn resolve_dependencies(
    &self,
    dependencies: &IndexVec<ImportRecordIdx, RawImportRecord>,
  ) -> BuildResult<IndexVec<ImportRecordIdx, ResolvedId>> {
    let jobs = dependencies.iter().map(|record| {
      resolve_id(&self.ctx.plugin, &record.specifier, Some(&self.resolved_id), record.kind)
    });

    let mut resolved_deps = IndexVec::with_capacity(dependencies.len());
    let mut errors = Vec::new();
    for result in join_all(jobs).await {
      match result {
        Ok(resolved_id) => {
          resolved_deps.push(resolved_id);
        }
        Err(err) => errors.push(err),
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    Ok(resolved_deps)
  }
}
