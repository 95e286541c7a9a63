/// Concatenates string slices into one `String`, allocating exactly once.
#[macro_export]
macro_rules! concat_string {
  () => { String::new() };
  ($($s:expr),+ $(,)?) => {
    [$(::core::convert::AsRef::<str>::as_ref(&$s)),+].concat()
  };
}

#[test]
fn test_concat_string() {
  let owned = String::from("b");
  assert_eq!(concat_string!("a", owned, "c"), "abc");
  assert_eq!(concat_string!(), "");
}
