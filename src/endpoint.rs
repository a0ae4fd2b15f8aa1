//! Request URL construction.
//!
//! Every query hits `<base>/api/edge/<segment>.json`, where the segment is
//! `<set>:<scope>` for public sets and `<user>/<api_key>/<set>:<scope>` for
//! private ones. Each component is percent-encoded separately so that scope
//! data can never change the shape of the path.

use std::fmt;
use urlencoding::encode;

const EDGE_PATH: &str = "api/edge";

/// A fully built request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl(String);

impl ApiUrl {
    /// URL for a public set query.
    pub fn public(base_url: &str, set: &str, scope: &str) -> Self {
        Self::build(base_url, &Self::set_segment(set, scope))
    }

    /// URL for a private set query. Credentials travel in the path.
    pub fn private(base_url: &str, user: &str, api_key: &str, set: &str, scope: &str) -> Self {
        let segment = format!(
            "{}/{}/{}",
            encode_component(user),
            encode_component(api_key),
            Self::set_segment(set, scope)
        );
        Self::build(base_url, &segment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn set_segment(set: &str, scope: &str) -> String {
        format!("{}:{}", encode_component(set), encode_component(scope))
    }

    fn build(base_url: &str, segment: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self(format!("{}/{}/{}.json", base, EDGE_PATH, segment))
    }
}

/// Percent-encode one path component.
///
/// Commas separate scope arguments (`site,category,term`) and are legal in a
/// path segment, so they are left as-is.
fn encode_component(raw: &str) -> String {
    encode(raw).replace("%2C", ",")
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
