use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Article, first_present};

pub const CLUB_ORIGIN: &str = "https://www.hckosice.sk";
pub const FALLBACK_IMAGE_URL: &str = "https://images.unsplash.com/photo-1515703407324-5f753eed217b?q=80&w=1000&auto=format&fit=crop";
pub const CLUB_LOGO_URL: &str = "https://upload.wikimedia.org/wikipedia/en/thumb/7/75/HC_Ko%C5%A1ice_logo.svg/1044px-HC_Ko%C5%A1ice_logo.svg.png";
pub const CLUB_NAME_FRAGMENT: &str = "košice";

static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)src=["']?([^"'\s>]+)["']?"#).expect("valid img src regex")
});

/// Turns whatever the feed put in an image field (absolute, protocol-relative,
/// site-relative, or a whole `<img>` tag) into a URL that is safe to load.
pub fn normalize_image_url(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return FALLBACK_IMAGE_URL.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return FALLBACK_IMAGE_URL.to_string();
    }

    let mut target = trimmed;
    if trimmed.to_lowercase().contains("<img")
        && let Some(src) = IMG_SRC_RE.captures(trimmed).and_then(|c| c.get(1))
    {
        target = src.as_str();
    }

    if target.starts_with("//") {
        return format!("https:{target}");
    }
    if target.starts_with('/') {
        return format!("{CLUB_ORIGIN}{target}");
    }
    if !target.starts_with("http") {
        return FALLBACK_IMAGE_URL.to_string();
    }
    target.to_string()
}

pub fn article_image(article: &Article) -> String {
    normalize_image_url(first_present(&[
        article.card_image_url.as_deref(),
        article.header_image_url.as_deref(),
        article.image.as_deref(),
    ]))
}

pub fn team_logo(explicit: Option<&str>, team_name: &str) -> String {
    if let Some(url) = first_present(&[explicit]) {
        return normalize_image_url(Some(url));
    }
    if team_name.to_lowercase().contains(CLUB_NAME_FRAGMENT) {
        return CLUB_LOGO_URL.to_string();
    }
    normalize_image_url(None)
}
