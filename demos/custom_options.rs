//! Customizing the canonical string with JoinOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_kvjoin::{join_with_options, JoinOptions, Order, UrlCoding};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Notify {
    #[serde(rename = "Bool")]
    flag: bool,
    #[serde(rename = "APPID")]
    app_id: String,
    #[serde(rename = "APPNo")]
    app_no: String,
    #[serde(rename = "Count")]
    count: i32,
    memo: String,
    extra: Extra,
}

#[derive(Debug, Serialize)]
struct Extra {
    channel: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let notify = Notify {
        flag: true,
        app_id: "secret".to_string(),
        app_no: "A1".to_string(),
        count: 0,
        memo: "paid in full".to_string(),
        extra: Extra {
            channel: "web".to_string(),
        },
    };

    println!("Tag table (b, -, app_no, count,omitempty):");
    let tags = JoinOptions::new()
        .with_field_tag("Bool", "b")
        .with_field_tag("APPID", "-")
        .with_field_tag("APPNo", "app_no")
        .with_field_tag("Count", "count,omitempty");
    println!("{}\n", join_with_options(&notify, tags.clone())?);

    println!("Descending, URL-encoded values:");
    let encoded = tags
        .clone()
        .with_order(Order::AsciiDesc, vec![])
        .with_url_coding(UrlCoding::Encode);
    println!("{}\n", join_with_options(&notify, encoded)?);

    println!("Caller-defined order, values only:");
    let defined = tags
        .clone()
        .with_order(Order::Defined, vec!["memo".into(), "app_no".into()])
        .with_ignore_key(true)
        .with_sep("|");
    println!("{}\n", join_with_options(&notify, defined)?);

    println!("Unwrapping nested structs:");
    let unwrapped = tags.with_unwrap(true);
    println!("{}", join_with_options(&notify, unwrapped)?);

    Ok(())
}
