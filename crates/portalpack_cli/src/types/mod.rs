pub mod language;
pub mod prefix_arg;
