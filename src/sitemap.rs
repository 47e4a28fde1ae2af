//! Sitemap ingestion and URL extraction
//!
//! Resolves the input designator (URL or local file path) into raw sitemap
//! XML and extracts the `<loc>` entries in document order. All failures here
//! are fatal: without a URL list there is nothing to capture.

use crate::SnapError;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::info;
use url::Url;

/// Load the ordered page-URL list from a sitemap URL or file path.
///
/// Capture order equals sitemap order; no de-duplication is performed. An
/// empty `<urlset>` yields an empty list, which is a valid zero-target run.
pub async fn load(designator: &str) -> Result<Vec<String>, SnapError> {
    let xml = fetch_sitemap(designator).await?;
    parse_page_urls(&xml)
}

async fn fetch_sitemap(designator: &str) -> Result<String, SnapError> {
    match Url::parse(designator) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            info!("Fetching sitemap from URL: {designator}");

            let response = reqwest::get(designator)
                .await
                .and_then(|response| response.error_for_status())
                .map_err(|e| SnapError::SitemapFetch {
                    url: designator.to_string(),
                    reason: e.to_string(),
                })?;

            response.text().await.map_err(|e| SnapError::SitemapFetch {
                url: designator.to_string(),
                reason: e.to_string(),
            })
        }
        _ => {
            info!("Reading sitemap from local file: {designator}");

            tokio::fs::read_to_string(designator)
                .await
                .map_err(|e| SnapError::SitemapRead {
                    path: designator.to_string(),
                    reason: e.to_string(),
                })
        }
    }
}

/// Extract `<loc>` values from the `<urlset>` entries, preserving order.
///
/// The document must carry a `<urlset>` node and every `<url>` entry must
/// carry a `<loc>`; anything else is a structural parse error.
pub fn parse_page_urls(xml: &str) -> Result<Vec<String>, SnapError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut urls = Vec::new();
    let mut saw_urlset = false;
    let mut in_url = false;
    let mut in_loc = false;
    let mut current_loc: Option<String> = None;

    loop {
        match reader.read_event() {
            Err(e) => return Err(SnapError::SitemapParse(format!("malformed XML: {e}"))),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"urlset" => saw_urlset = true,
                b"url" if saw_urlset => {
                    in_url = true;
                    current_loc = None;
                }
                b"loc" if in_url => in_loc = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"urlset" => saw_urlset = true,
                b"url" if saw_urlset => {
                    return Err(SnapError::SitemapParse(
                        "sitemap <url> entry is missing its <loc> element".to_string(),
                    ));
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_loc => {
                let text = t
                    .unescape()
                    .map_err(|e| SnapError::SitemapParse(format!("malformed XML: {e}")))?;
                current_loc = Some(text.trim().to_string());
            }
            Ok(Event::CData(t)) if in_loc => {
                let text = String::from_utf8_lossy(&t.into_inner()).trim().to_string();
                current_loc = Some(text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"loc" => in_loc = false,
                b"url" if in_url => {
                    in_url = false;
                    match current_loc.take() {
                        Some(loc) if !loc.is_empty() => urls.push(loc),
                        _ => {
                            return Err(SnapError::SitemapParse(
                                "sitemap <url> entry is missing its <loc> element".to_string(),
                            ));
                        }
                    }
                }
                _ => {}
            },
            Ok(_) => {}
        }
    }

    if !saw_urlset {
        return Err(SnapError::SitemapParse(
            "document has no <urlset> node".to_string(),
        ));
    }

    Ok(urls)
}
