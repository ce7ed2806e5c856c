//! Your first canonical string: join a struct for signing.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_kvjoin::join;
use std::error::Error;

#[derive(Debug, Serialize)]
struct UnifiedOrder {
    appid: String,
    mch_id: String,
    nonce_str: String,
    body: String,
    total_fee: u32,
    attach: Option<String>,
    detail: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let order = UnifiedOrder {
        appid: "wxd930ea5d5a258f4f".to_string(),
        mch_id: "10000100".to_string(),
        nonce_str: "ibuaiVcKdpRxkhJA".to_string(),
        body: "test".to_string(),
        total_fee: 1,
        attach: None,
        detail: vec!["sequences are never joined".to_string()],
    };

    let canonical = join(&order)?;
    println!("{}", canonical);
    // appid=wxd930ea5d5a258f4f&body=test&mch_id=10000100&nonce_str=ibuaiVcKdpRxkhJA&total_fee=1

    let with_key = format!("{}&key=192006250b4c09247ec02edce69f6a2d", canonical);
    println!("string to sign: {}", with_key);

    Ok(())
}
