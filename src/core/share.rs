//! Social share links for a generated caption

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Title attached to LinkedIn shares
pub const SHARE_TITLE: &str = "Check out this AI-generated caption!";

/// Networks a caption can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    Twitter,
    Facebook,
    LinkedIn,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 3] = [
        ShareTarget::Twitter,
        ShareTarget::Facebook,
        ShareTarget::LinkedIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareTarget::Twitter => "twitter",
            ShareTarget::Facebook => "facebook",
            ShareTarget::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(ShareTarget::Twitter),
            "facebook" => Ok(ShareTarget::Facebook),
            "linkedin" => Ok(ShareTarget::LinkedIn),
            other => Err(format!("unknown share target: {}", other)),
        }
    }
}

/// Build the share intent URL for `caption`, pointing back at `page_url`
///
/// `page_url` must be an absolute URL.
pub fn share_url(target: ShareTarget, caption: &str, page_url: &str) -> Result<Url, url::ParseError> {
    let page = Url::parse(page_url)?;
    let page_url = page.as_str();
    match target {
        ShareTarget::Twitter => Url::parse_with_params(
            "https://twitter.com/intent/tweet",
            &[("text", caption), ("url", page_url)],
        ),
        ShareTarget::Facebook => Url::parse_with_params(
            "https://www.facebook.com/sharer/sharer.php",
            &[("u", page_url), ("quote", caption)],
        ),
        ShareTarget::LinkedIn => Url::parse_with_params(
            "https://www.linkedin.com/shareArticle",
            &[
                ("mini", "true"),
                ("url", page_url),
                ("title", SHARE_TITLE),
                ("summary", caption),
            ],
        ),
    }
}

/// Share links for every supported network
pub fn share_links(caption: &str, page_url: &str) -> Result<Vec<(ShareTarget, Url)>, url::ParseError> {
    ShareTarget::ALL
        .iter()
        .map(|target| share_url(*target, caption, page_url).map(|url| (*target, url)))
        .collect()
}
