#[derive(Debug)]
pub struct HookLoadArgs<'a> {
  pub id: &'a str,
  pub namespace: &'a str,
}
