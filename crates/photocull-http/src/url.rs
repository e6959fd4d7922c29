//! Route construction for the photocull server API.
//!
//! Every route is relative to the configured API root, so the root must end
//! in a slash for `Url::join` to append rather than replace.

use photocull_core::ImageId;
use url::Url;

use crate::error::HttpResult;

/// Parse the configured API root, adding a trailing slash when missing.
pub fn parse_base_url(base: &str) -> HttpResult<Url> {
    let trimmed = base.trim();
    let url = if trimmed.ends_with('/') {
        Url::parse(trimmed)?
    } else {
        Url::parse(&format!("{trimmed}/"))?
    };
    Ok(url)
}

/// `GET images`: the full listing.
pub fn images_url(base: &Url) -> HttpResult<Url> {
    Ok(base.join("images")?)
}

/// `POST upload`: multipart upload and analysis.
pub fn upload_url(base: &Url) -> HttpResult<Url> {
    Ok(base.join("upload")?)
}

/// `POST images/{id}/rating`: persist one judgment.
pub fn rating_url(base: &Url, id: ImageId) -> HttpResult<Url> {
    Ok(base.join(&format!("images/{id}/rating"))?)
}

/// `POST export`: export the selected images.
pub fn export_url(base: &Url) -> HttpResult<Url> {
    Ok(base.join("export")?)
}
