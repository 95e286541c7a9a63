use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How the text of a module is turned into JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
  Js,
  Ts,
  Json,
  Jsx,
  Tsx,
  Text,
}

impl TryFrom<&str> for ModuleType {
  type Error = String;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    match value {
      "js" => Ok(Self::Js),
      "ts" => Ok(Self::Ts),
      "json" => Ok(Self::Json),
      "jsx" => Ok(Self::Jsx),
      "tsx" => Ok(Self::Tsx),
      "text" => Ok(Self::Text),
      _ => Err(format!("Invalid module type: {value:?}")),
    }
  }
}

impl Display for ModuleType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::Js => "js",
      Self::Ts => "ts",
      Self::Json => "json",
      Self::Jsx => "jsx",
      Self::Tsx => "tsx",
      Self::Text => "text",
    };
    f.write_str(name)
  }
}
