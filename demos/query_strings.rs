//! Canonicalizing URLs and parsed query parameters.
//!
//! Run with: cargo run --example query_strings

use serde_kvjoin::{join, join_with_options, JoinOptions, UrlCoding, UrlValues};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let url = "https://api.example.com/notify?sign=AB12&total_fee=88&attach=&body=test+goods";

    println!("From a URL:");
    println!("{}\n", join(url)?);

    println!("Re-encoded for transport:");
    let options = JoinOptions::new().with_url_coding(UrlCoding::Encode);
    println!("{}\n", join_with_options(url, options)?);

    println!("From parsed parameters, without the signature:");
    let values: UrlValues = url.split_once('?').map_or("", |(_, q)| q).parse()?;
    let mut options = JoinOptions::new();
    options.except_keys = vec!["sign".to_string()];
    println!("{}\n", join_with_options(&values, options)?);

    println!("Malformed input:");
    match join("a=%zz") {
        Ok(s) => println!("unexpected success: {}", s),
        Err(e) => println!("error: {}", e),
    }

    Ok(())
}
