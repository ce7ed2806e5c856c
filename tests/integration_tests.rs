use serde::Serialize;
use serde_json::json;
use serde_kvjoin::{
    join, join_flat_map, join_with_options, to_flat_map, Error, FieldNames, JoinOptions, Order,
    UrlCoding, UrlValues, Value,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize)]
struct Callback {
    #[serde(rename = "Bool")]
    flag: bool,
    #[serde(rename = "APPID")]
    app_id: String,
    #[serde(rename = "APPName")]
    app_name: String,
    #[serde(rename = "APPNo")]
    app_no: String,
    #[serde(rename = "Count")]
    count: i32,
    #[serde(rename = "Score")]
    score: Vec<i32>,
    #[serde(rename = "Player")]
    player: Vec<Player>,
    #[serde(rename = "Data")]
    data: Option<HashMap<String, String>>,
}

#[derive(Serialize)]
struct Player {
    count: i32,
}

fn callback_tags() -> JoinOptions {
    JoinOptions::new()
        .with_field_tag("Bool", "b,omitempty")
        .with_field_tag("APPID", "-")
        .with_field_tag("APPName", "app_name,omitempty")
        .with_field_tag("APPNo", "app_no")
        .with_field_tag("Count", "count,omitempty")
        .with_field_tag("Score", "score,omitempty")
        .with_field_tag("Player", "player")
        .with_field_tag("Data", "data,omitempty")
}

fn callback() -> Callback {
    Callback {
        flag: true,
        app_id: "2c5a3f0e9b1d4a7e8f6c0b1a2d3e4f5a".to_string(),
        app_name: String::new(),
        app_no: "A1".to_string(),
        count: 0,
        score: vec![],
        player: vec![Player { count: 3 }],
        data: None,
    }
}

#[test]
fn test_tagged_record() {
    let joined = join_with_options(&callback(), callback_tags()).unwrap();
    assert_eq!(joined, "app_no=A1&b=true");
}

#[test]
fn test_tagged_record_keeps_zero_without_omitempty() {
    #[derive(Serialize)]
    struct Record {
        #[serde(rename = "Count")]
        count: i32,
        #[serde(rename = "Total")]
        total: i32,
    }

    let options = JoinOptions::new()
        .with_ignore_empty(false)
        .with_field_tag("Count", "count,omitempty")
        .with_field_tag("Total", "total");
    let joined = join_with_options(&Record { count: 0, total: 0 }, options).unwrap();
    assert_eq!(joined, "total=0");
}

#[test]
fn test_untagged_fields_keep_serialized_name() {
    let joined = join(&callback()).unwrap();
    assert_eq!(joined, "APPID=2c5a3f0e9b1d4a7e8f6c0b1a2d3e4f5a&APPNo=A1&Bool=true");
}

#[test]
fn test_mapping_drops_empty_value() {
    let map = HashMap::from([("x", "1"), ("y", "")]);
    assert_eq!(join(&map).unwrap(), "x=1");
}

#[test]
fn test_explicit_order() {
    let map = BTreeMap::from([("a", "1"), ("b", "2")]);
    let options =
        JoinOptions::new().with_order(Order::Defined, vec!["b".to_string(), "a".to_string()]);
    assert_eq!(join_with_options(&map, options).unwrap(), "b=2&a=1");
}

#[test]
fn test_explicit_order_without_list_is_config_error() {
    let map = BTreeMap::from([("a", "1")]);
    let options = JoinOptions::new().with_order(Order::Defined, vec![]);
    assert!(matches!(
        join_with_options(&map, options),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_order_loaded_from_string() {
    let order: Order = "desc".parse().unwrap();
    let map = BTreeMap::from([("a", 1), ("b", 2)]);
    let options = JoinOptions::new().with_order(order, vec![]);
    assert_eq!(join_with_options(&map, options).unwrap(), "b=2&a=1");
}

#[test]
fn test_url_string_input() {
    let url = "https://pay.example.com/notify?total_fee=100&out_trade_no=T1&attach=&appid=wx01";
    assert_eq!(
        join(url).unwrap(),
        "appid=wx01&out_trade_no=T1&total_fee=100"
    );
}

#[test]
fn test_query_without_question_mark() {
    assert_eq!(join("b=2&a=1").unwrap(), "a=1&b=2");
    assert_eq!(join(&"b=2&a=1".to_string()).unwrap(), "a=1&b=2");
}

#[test]
fn test_malformed_query_is_parse_error() {
    let result = join("https://example.com/?a=%GG");
    assert!(matches!(result, Err(Error::Parse { .. })));

    let result = join("a=1;b=2");
    assert!(matches!(result, Err(Error::Parse { .. })));
}

#[test]
fn test_url_values_input() {
    let mut values = UrlValues::new();
    values.append("sign", "abc");
    values.append("nonce", "n1");
    values.append("nonce", "n2");
    assert_eq!(join(&values).unwrap(), "nonce=n1&sign=abc");
}

#[test]
fn test_url_values_round_trip_through_url_coding() {
    let values: UrlValues = "q=hello+world&tag=a%26b".parse().unwrap();

    assert_eq!(join(&values).unwrap(), "q=hello world&tag=a&b");

    let options = JoinOptions::new().with_url_coding(UrlCoding::Encode);
    assert_eq!(
        join_with_options(&values, options).unwrap(),
        "q=hello+world&tag=a%26b"
    );
}

#[test]
fn test_url_decoding_leaves_undecodable_values() {
    let map = BTreeMap::from([("a", "50%"), ("b", "x%3Dy")]);
    let options = JoinOptions::new().with_url_coding(UrlCoding::Decode);
    assert_eq!(join_with_options(&map, options).unwrap(), "a=50%&b=x=y");
}

#[test]
fn test_json_object_input() {
    let body = json!({
        "mch_id": 10000100,
        "body": "test",
        "fee": 1.5,
        "paid": false,
        "detail": { "goods": "x" },
        "items": [1, 2, 3],
        "coupon": null
    });
    assert_eq!(join(&body).unwrap(), "body=test&fee=1.5&mch_id=10000100");

    let options = JoinOptions::new().with_unwrap(true).with_ignore_empty(false);
    assert_eq!(
        join_with_options(&body, options).unwrap(),
        "body=test&fee=1.5&goods=x&mch_id=10000100&paid=false"
    );
}

#[test]
fn test_json_scalar_is_unsupported() {
    assert_eq!(
        join(&json!(42)).unwrap_err(),
        Error::UnsupportedType("u64".to_string())
    );
    assert_eq!(
        join(&json!([1, 2])).unwrap_err(),
        Error::UnsupportedType("seq".to_string())
    );
}

#[test]
fn test_sequences_never_flattened() {
    #[derive(Serialize)]
    struct WithLists {
        id: u32,
        scores: Vec<u32>,
        pairs: Vec<(String, String)>,
        fixed: [u8; 2],
    }

    let value = WithLists {
        id: 1,
        scores: vec![1, 2],
        pairs: vec![("k".to_string(), "v".to_string())],
        fixed: [1, 2],
    };
    for unwrap in [false, true] {
        let options = JoinOptions::new().with_unwrap(unwrap);
        assert_eq!(join_with_options(&value, options).unwrap(), "id=1");
    }
}

#[test]
fn test_unwrap_map_field() {
    #[derive(Serialize)]
    struct Request {
        method: String,
        extra: BTreeMap<String, i32>,
    }

    let request = Request {
        method: "pay".to_string(),
        extra: BTreeMap::from([("amount".to_string(), 5), ("method".to_string(), 9)]),
    };
    assert_eq!(join(&request).unwrap(), "method=pay");

    let options = JoinOptions::new().with_unwrap(true);
    assert_eq!(
        join_with_options(&request, options).unwrap(),
        "amount=5&method=9"
    );
}

#[test]
fn test_stages_separately() {
    let options = JoinOptions::new().with_ignore_key(true).with_sep("");
    let entries = to_flat_map(&BTreeMap::from([("b", "2"), ("a", "1")]), &options).unwrap();
    assert_eq!(entries.get("a"), Some(&Value::from("1")));
    assert_eq!(join_flat_map(&entries, &options).unwrap(), "12");
}

#[test]
fn test_field_names_table() {
    #[derive(Serialize)]
    struct Sparse {
        alpha: u8,
        beta: u8,
    }

    let mut tags = indexmap::IndexMap::new();
    tags.insert("beta".to_string(), "b".to_string());
    let options = JoinOptions::new().with_field_names(FieldNames::Tagged(tags));
    assert_eq!(
        join_with_options(&Sparse { alpha: 1, beta: 2 }, options).unwrap(),
        "alpha=1&b=2"
    );
}

#[test]
fn test_empty_result_is_not_an_error() {
    let map: HashMap<String, String> = HashMap::new();
    assert_eq!(join(&map).unwrap(), "");
    assert_eq!(join("").unwrap(), "");
}

#[test]
fn test_user_serialize_error_is_propagated() {
    struct Failing;

    impl Serialize for Failing {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    #[derive(Serialize)]
    struct Holder {
        inner: Failing,
    }

    assert_eq!(
        join(&Holder { inner: Failing }).unwrap_err(),
        Error::Custom("cannot serialize".to_string())
    );
}

#[test]
fn test_float_text_is_canonical() {
    #[derive(Serialize)]
    struct Rate {
        ratio: f32,
        scale: f64,
        bias: f32,
    }

    let rate = Rate {
        ratio: 0.1,
        scale: 0.1,
        bias: 0.0,
    };
    assert_eq!(join(&rate).unwrap(), "ratio=0.1&scale=0.1");

    let map = BTreeMap::from([("k", 0.1f32), ("w", 2.5f32)]);
    assert_eq!(join(&map).unwrap(), "k=0.1&w=2.5");
}

#[test]
fn test_negative_zero_is_kept() {
    let map = BTreeMap::from([("neg", -0.0f64), ("pos", 0.0f64)]);
    assert_eq!(join(&map).unwrap(), "neg=-0");
}

#[test]
fn test_wide_integer_keys() {
    let map = BTreeMap::from([(7i128, "v"), (-2i128, "w")]);
    assert_eq!(join(&map).unwrap(), "-2=w&7=v");

    let map = BTreeMap::from([(u128::MAX, "max")]);
    assert_eq!(
        join(&map).unwrap(),
        "340282366920938463463374607431768211455=max"
    );
}
