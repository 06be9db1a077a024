// src/fetch/mod.rs
use anyhow::{Context, Result};
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Daily NAV snapshot covering every scheme AMFI publishes.
pub const NAV_ALL_URL: &str = "https://www.amfiindia.com/spages/NAVAll.txt";

const NAV_HISTORY_URL: &str = "http://portal.amfiindia.com/DownloadNAVHistoryReport_Po.aspx";

/// Portal URL for a historical NAV report. Dates are passed through
/// verbatim in the feed's `DD-Mon-YYYY` form.
pub fn nav_history_url(from_date: &str, to_date: &str) -> String {
    format!("{NAV_HISTORY_URL}?tp=1&frmdt={from_date}&todt={to_date}")
}

/// Download the full daily report as one string.
pub async fn fetch_nav_all(client: &Client) -> Result<String> {
    fetch_text(client, NAV_ALL_URL).await
}

pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?;
    let text = resp
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("reading body of {url}"))?;
    info!(%url, bytes = text.len(), "downloaded NAV report");
    Ok(text)
}

/// Read a previously saved report from disk, for offline runs.
pub async fn read_nav_file(path: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(path.as_ref())
        .await
        .with_context(|| format!("reading {}", path.as_ref().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn history_url_passes_dates_verbatim() {
        assert_eq!(
            nav_history_url("01-Oct-2018", "03-Oct-2018"),
            "http://portal.amfiindia.com/DownloadNAVHistoryReport_Po.aspx?tp=1&frmdt=01-Oct-2018&todt=03-Oct-2018"
        );
    }

    #[tokio::test]
    async fn reads_saved_report_from_disk() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"Scheme Code;Date\r\n \r\n")?;

        let raw = read_nav_file(tmp.path()).await?;
        assert_eq!(raw, "Scheme Code;Date\r\n \r\n");
        Ok(())
    }
}
