/// The synthetic document importing every entry record.
pub const ENTRY_NAMESPACE: &str = "portal-entry";
/// Record tags, ids are canonical record-tag ids.
pub const TAG_NAMESPACE: &str = "portal-tag";
/// Host registered libraries, ids are library ids.
pub const LIBRARY_NAMESPACE: &str = "portal-library";
/// Remote modules, ids are absolute urls.
pub const HTTP_NAMESPACE: &str = "http-url";

/// The specifier the engine is given as its only input.
pub const ENTRY_PATH: &str = "portal:entry";
