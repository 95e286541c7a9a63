pub mod engine_output;

use std::sync::Arc;

use oxc_index::IndexVec;
use portalpack_common::{ModuleIdx, NormalModule, NormalizedEngineOptions};
use portalpack_ecmascript::EcmaAst;

pub type IndexModules = IndexVec<ModuleIdx, NormalModule>;
pub type IndexEcmaAst = IndexVec<ModuleIdx, EcmaAst>;

pub type SharedOptions = Arc<NormalizedEngineOptions>;
