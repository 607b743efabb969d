//! Outbound link decoration with UTM tracking parameters.

use std::borrow::Cow;

use url::Url;

pub const DEFAULT_UTM_SOURCE: &str = "bestseatosky";
pub const DEFAULT_UTM_MEDIUM: &str = "directory";

const GOOGLE_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Tracking parameters merged into an outbound link.
///
/// `source` and `medium` fall back to [`DEFAULT_UTM_SOURCE`] and [`DEFAULT_UTM_MEDIUM`];
/// the rest are only written when set. Empty values are never written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub content: Option<String>,
    pub term: Option<String>,
}

impl UtmParams {
    /// Campaign/content pair used for listing outbound links.
    pub fn for_listing(category_slug: &str, listing_slug: &str) -> Self {
        Self {
            campaign: Some(category_slug.to_string()),
            content: Some(listing_slug.to_string()),
            ..Default::default()
        }
    }

    fn resolved(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (
                "utm_source",
                Some(self.source.as_deref().unwrap_or(DEFAULT_UTM_SOURCE)),
            ),
            (
                "utm_medium",
                Some(self.medium.as_deref().unwrap_or(DEFAULT_UTM_MEDIUM)),
            ),
            ("utm_campaign", self.campaign.as_deref()),
            ("utm_content", self.content.as_deref()),
            ("utm_term", self.term.as_deref()),
        ]
    }
}

/// Merge UTM parameters into `base_url`, overriding any parameter of the same name.
///
/// A missing scheme is treated as `https://`. If the result still does not parse,
/// the input is returned unchanged.
pub fn build_utm_url(base_url: &str, params: &UtmParams) -> String {
    match decorate(base_url, params) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::debug!(base_url, error = %e, "Leaving undecoratable link untouched");
            base_url.to_string()
        }
    }
}

/// Google Maps search link for a street address, decorated like any other outbound link.
pub fn directions_url(address: &str, params: &UtmParams) -> String {
    match Url::parse_with_params(GOOGLE_MAPS_SEARCH_URL, &[("api", "1"), ("query", address)]) {
        Ok(url) => build_utm_url(url.as_str(), params),
        Err(_) => build_utm_url(GOOGLE_MAPS_SEARCH_URL, params),
    }
}

fn decorate(base_url: &str, params: &UtmParams) -> Result<Url, url::ParseError> {
    let candidate = if has_http_scheme(base_url) {
        Cow::Borrowed(base_url)
    } else {
        Cow::Owned(format!("https://{base_url}"))
    };
    let mut url = Url::parse(&candidate)?;

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    for (key, value) in params.resolved() {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            set_param(&mut pairs, key, value);
        }
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }
    Ok(url)
}

/// Replace the first occurrence of `key` in place and drop any later duplicates,
/// or append it when absent.
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        *v = value.to_string();
        true
    });
    if !seen {
        pairs.push((key.to_string(), value.to_string()));
    }
}

fn has_http_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_added_and_defaults_applied() {
        let params = UtmParams {
            campaign: Some("eat".to_string()),
            content: Some("foo".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_utm_url("example.com", &params),
            "https://example.com/?utm_source=bestseatosky&utm_medium=directory&utm_campaign=eat&utm_content=foo"
        );
    }

    #[test]
    fn test_unparseable_input_is_returned_unchanged() {
        let params = UtmParams::for_listing("eat", "foo");
        assert_eq!(build_utm_url("not a url###", &params), "not a url###");
    }

    #[test]
    fn test_existing_params_are_overridden_in_place() {
        let params = UtmParams {
            source: Some("newsletter".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_utm_url(
                "http://shop.example.com/menu?utm_source=old&lang=en&utm_source=older",
                &params
            ),
            "http://shop.example.com/menu?utm_source=newsletter&lang=en&utm_medium=directory"
        );
    }

    #[test]
    fn test_uppercase_scheme_is_kept() {
        let url = build_utm_url("HTTPS://Example.com/a", &UtmParams::default());
        assert_eq!(
            url,
            "https://example.com/a?utm_source=bestseatosky&utm_medium=directory"
        );
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let params = UtmParams {
            source: Some(String::new()),
            term: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            build_utm_url("example.com", &params),
            "https://example.com/?utm_medium=directory"
        );
    }

    #[test]
    fn test_directions_url_encodes_address() {
        let url = directions_url("38 Main St, Squamish", &UtmParams::for_listing("eat", "cafe"));
        assert_eq!(
            url,
            "https://www.google.com/maps/search/?api=1&query=38+Main+St%2C+Squamish&utm_source=bestseatosky&utm_medium=directory&utm_campaign=eat&utm_content=cafe"
        );
    }
}
