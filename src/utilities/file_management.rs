use std::fs;
use std::path::Path;

use log::info;
use reqwest::Client;

/// Reads the page to annotate from an http(s) URL or a local file.
pub async fn load_page_source(
    source: &str,
    client: &Client,
) -> Result<String, Box<dyn std::error::Error>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        info!("Downloading page from {}", source);
        let response = client.get(source).send().await?.error_for_status()?;
        return Ok(response.text().await?);
    }

    info!("Reading page from {}", source);
    Ok(fs::read_to_string(source)?)
}

/// Writes `content` to `path`, replacing any existing file and creating
/// missing parent directories.
pub fn save_page(path: &str, content: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
