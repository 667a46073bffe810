/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys ending in `_comment` annotate their sibling key, and
/// `{ "value": .., "comment": .. }` entries inside sequences become annotated
/// references, the same folding applied when deserializing.
///
/// ```rust
/// use serde_pbxproj::pbx;
///
/// let group = pbx!({
///     "isa": "PBXGroup",
///     "children": [
///         { "value": "29B97316FDCFA39411CA2CEA", "comment": "main.m" }
///     ],
///     "name": "CustomTemplate",
///     "name_comment": "top level"
/// });
///
/// let record = group.as_object().unwrap();
/// assert_eq!(record.len(), 3);
/// assert_eq!(record.comment("name"), Some("top level"));
/// ```
#[macro_export]
macro_rules! pbx {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::sequence(vec![$($crate::pbx!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::PbxMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let pairs: ::std::vec::Vec<(::std::string::String, $crate::Value)> = vec![
            $(($key.to_string(), $crate::pbx!($value))),*
        ];
        $crate::Value::Object($crate::PbxMap::from_legacy(pairs))
    }};

    // Any other expression goes through serde.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}
