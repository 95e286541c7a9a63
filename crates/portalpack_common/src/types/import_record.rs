use std::fmt::Debug;

use arcstr::ArcStr;
use oxc::span::Span;

use crate::{ImportKind, ModuleIdx};

pub type RawImportRecord = ImportRecord<Span>;
pub type ResolvedImportRecord = ImportRecord<ModuleIdx>;

#[derive(Debug)]
pub struct ImportRecord<State: Debug> {
  /// Span of the import statement or `import()` expression before resolution, the imported module after.
  pub state: State,
  /// `./lib.js` in `import { foo } from './lib.js';`
  pub specifier: ArcStr,
  pub kind: ImportKind,
}

impl RawImportRecord {
  pub fn new(specifier: ArcStr, kind: ImportKind, span: Span) -> Self {
    Self { specifier, kind, state: span }
  }

  pub fn into_resolved(self, resolved_module: ModuleIdx) -> ResolvedImportRecord {
    ResolvedImportRecord { state: resolved_module, specifier: self.specifier, kind: self.kind }
  }
}
