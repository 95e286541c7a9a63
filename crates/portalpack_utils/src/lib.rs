mod concat_string;
pub mod ecmascript;
pub mod indexmap;
pub mod pretty_type_name;
