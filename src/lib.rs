//! Scraper for the daily AMFI NAV report.
//!
//! [`fetch`] pulls the raw `NAVAll.txt` blob, [`parse`] walks it with a
//! line-oriented state machine, and the result is a [`NavHierarchy`] keyed
//! by scheme type, scheme sub-type, and fund house.

pub mod error;
pub mod fetch;
pub mod model;
pub mod parse;
pub mod schema;

pub use error::{FormatError, ParseError, SchemaError};
pub use model::{FundRecord, NavHierarchy};
pub use parse::{parse_nav_file, NavParser};

use anyhow::Result;
use reqwest::Client;

/// Fetch today's report and parse it with the stock header table.
pub async fn fetch_all_funds(client: &Client) -> Result<NavHierarchy> {
    let raw = fetch::fetch_nav_all(client).await?;
    let hierarchy = tokio::task::spawn_blocking(move || parse_nav_file(&raw)).await??;
    Ok(hierarchy)
}
