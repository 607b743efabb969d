//! Town/tag narrowing of a category's listing set.
//!
//! The input is already restricted to one category and to published listings. The
//! filter only decides visibility and never reorders: the output keeps input order.

use db::models::listing::Listing;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sentinel town selection meaning "no town restriction".
pub const ALL_TOWNS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case", tag = "kind", content = "slug")]
pub enum TownFilter {
    #[default]
    All,
    Town(String),
}

impl TownFilter {
    /// `None`, blank and `"all"` select every town; anything else is a town slug.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_TOWNS) => TownFilter::All,
            Some(slug) => TownFilter::Town(slug.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TownFilter::All => ALL_TOWNS,
            TownFilter::Town(slug) => slug,
        }
    }

    /// Listings without a town never pass a specific town filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            TownFilter::All => true,
            TownFilter::Town(slug) => listing.town_slug.as_deref() == Some(slug.as_str()),
        }
    }
}

/// Active town and tag selections.
///
/// Tags combine with OR: a listing passes when it carries any selected tag. The
/// selection is kept in the order tags were picked and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
pub struct ListingFilter {
    town: TownFilter,
    tags: Vec<String>,
}

impl ListingFilter {
    pub fn new(town: TownFilter) -> Self {
        Self {
            town,
            tags: Vec::new(),
        }
    }

    /// Filter from the category page query string: `town=<slug|all>` and
    /// `tag=<slug>[,<slug>...]`. Repeated tag slugs collapse into one selection.
    pub fn from_query(town: Option<&str>, tags: Option<&str>) -> Self {
        let mut filter = Self::new(TownFilter::parse(town));
        for slug in tags.into_iter().flat_map(|raw| raw.split(',')) {
            filter.select_tag(slug);
        }
        filter
    }

    pub fn town(&self) -> &TownFilter {
        &self.town
    }

    pub fn active_tags(&self) -> &[String] {
        &self.tags
    }

    /// Select `slug` if it is not active, deselect it if it is.
    pub fn toggle_tag(&mut self, slug: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == slug) {
            self.tags.remove(pos);
        } else {
            self.tags.push(slug.to_string());
        }
    }

    fn select_tag(&mut self, slug: &str) {
        let slug = slug.trim();
        if !slug.is_empty() && !self.tags.iter().any(|t| t == slug) {
            self.tags.push(slug.to_string());
        }
    }

    pub fn matches_tags(&self, listing: &Listing) -> bool {
        self.tags.is_empty()
            || listing
                .tag_slugs()
                .any(|slug| self.tags.iter().any(|t| t == slug))
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.town.matches(listing) && self.matches_tags(listing)
    }

    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}
