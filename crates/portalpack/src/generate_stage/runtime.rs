//! The module registry every bundle carries. Modules register a factory with `__portal_define` and
//! are evaluated on their first `__portal_require`, so a cycle observes the partially filled
//! exports object of the module that is still running.

pub const RUNTIME_PRELUDE: &str = r#""use strict";
(function () {
var __portal_factories = Object.create(null);
var __portal_cache = Object.create(null);
function __portal_define(id, factory) {
  __portal_factories[id] = factory;
}
function __portal_require(id) {
  var cached = __portal_cache[id];
  if (cached !== undefined) return cached;
  var exports = Object.create(null);
  Object.defineProperty(exports, Symbol.toStringTag, { value: "Module" });
  __portal_cache[id] = exports;
  __portal_factories[id].call(undefined, exports);
  return exports;
}
function __portal_export(target, getters) {
  for (var name in getters) {
    Object.defineProperty(target, name, { get: getters[name], enumerable: true });
  }
}
function __portal_re_export(target, source) {
  Object.keys(source).forEach(function (name) {
    if (name === "default" || Object.prototype.hasOwnProperty.call(target, name)) return;
    Object.defineProperty(target, name, {
      get: function () { return source[name]; },
      enumerable: true,
    });
  });
}"#;

pub const RUNTIME_EPILOGUE: &str = "})();";

pub const EXPORTS_PARAM: &str = "__portal_exports";
pub const DEFAULT_EXPORT_BINDING: &str = "__portal_default";
pub const NAMESPACE_BINDING_PREFIX: &str = "__portal_import_";
