use clap::ValueEnum;
use portalpack_bundler::ModuleType;

#[derive(Debug, PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Language {
  Js,
  Ts,
  Json,
  Jsx,
  Tsx,
  Text,
}

impl From<Language> for ModuleType {
  fn from(value: Language) -> Self {
    match value {
      Language::Js => ModuleType::Js,
      Language::Ts => ModuleType::Ts,
      Language::Json => ModuleType::Json,
      Language::Jsx => ModuleType::Jsx,
      Language::Tsx => ModuleType::Tsx,
      Language::Text => ModuleType::Text,
    }
  }
}
