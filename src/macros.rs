/// Builds a [`FlatMap`](crate::FlatMap) from `key => value` pairs.
///
/// Keys go through `ToString`, values through `Value::from`. A repeated key
/// keeps its last value.
///
/// ```rust
/// use serde_kvjoin::{flat_map, join_flat_map, JoinOptions};
///
/// let entries = flat_map! {
///     "appid" => "wx01",
///     "total_fee" => 100,
///     "debug" => false,
/// };
/// let joined = join_flat_map(&entries, &JoinOptions::new()).unwrap();
/// assert_eq!(joined, "appid=wx01&total_fee=100");
/// ```
#[macro_export]
macro_rules! flat_map {
    () => {
        $crate::FlatMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::FlatMap::new();
        $(
            map.insert(::std::string::ToString::to_string(&$key), $crate::Value::from($value));
        )+
        map
    }};
}
