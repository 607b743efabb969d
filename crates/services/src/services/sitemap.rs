//! `sitemap.xml` generation.

use chrono::{DateTime, SecondsFormat, Utc};
use db::models::{
    listing::{Listing, ListingSitemapEntry},
    seo_page::SeoPage,
};
use sqlx::SqlitePool;
use strum_macros::Display;
use tracing::warn;
use utils::text::escape_markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Root, then one entry per category path, per published listing and per published guide.
/// Listings without a category are placed under the first category path.
pub fn build_sitemap<'a>(
    base_url: &str,
    category_slugs: impl IntoIterator<Item = &'a str>,
    listings: &[ListingSitemapEntry],
    guides: &[SeoPage],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let category_slugs: Vec<&str> = category_slugs.into_iter().collect();
    let fallback_category = category_slugs.first().copied().unwrap_or("eat");

    let mut entries = Vec::with_capacity(1 + category_slugs.len() + listings.len() + guides.len());
    entries.push(SitemapEntry {
        loc: base_url.to_string(),
        lastmod: Some(now),
        changefreq: ChangeFrequency::Daily,
        priority: 1.0,
    });

    entries.extend(category_slugs.iter().map(|slug| SitemapEntry {
        loc: format!("{base_url}/{slug}"),
        lastmod: Some(now),
        changefreq: ChangeFrequency::Daily,
        priority: 0.9,
    }));

    entries.extend(listings.iter().map(|listing| {
        let category = listing
            .category_slug
            .as_deref()
            .unwrap_or(fallback_category);
        SitemapEntry {
            loc: format!("{base_url}/{category}/{}", listing.slug),
            lastmod: Some(listing.updated_at),
            changefreq: ChangeFrequency::Weekly,
            priority: 0.8,
        }
    }));

    entries.extend(guides.iter().map(|guide| SitemapEntry {
        loc: format!("{base_url}/guide/{}", guide.slug),
        lastmod: None,
        changefreq: ChangeFrequency::Weekly,
        priority: 0.7,
    }));

    entries
}

pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("<url>\n");
        xml.push_str(&format!("<loc>{}</loc>\n", escape_markup(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!(
                "<lastmod>{}</lastmod>\n",
                lastmod.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        xml.push_str(&format!("<changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("<priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("</url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Read the published listings and guides and render the document.
/// A failed read leaves that section out rather than failing the whole sitemap.
pub async fn load<'a>(
    pool: &SqlitePool,
    base_url: &str,
    category_slugs: impl IntoIterator<Item = &'a str>,
) -> String {
    let (listings, guides) = tokio::join!(
        Listing::find_sitemap_entries(pool),
        SeoPage::find_published(pool)
    );
    let listings = listings.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load listings for sitemap");
        Vec::new()
    });
    let guides = guides.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load guides for sitemap");
        Vec::new()
    });

    render_xml(&build_sitemap(
        base_url,
        category_slugs,
        &listings,
        &guides,
        Utc::now(),
    ))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use db::{DBService, test_support::seed_directory};

    use super::*;

    const BASE: &str = "https://bestseatosky.com";

    #[test]
    fn test_entries_are_grouped_and_prioritised() {
        let updated = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let listings = vec![
            ListingSitemapEntry {
                slug: "purebread".to_string(),
                category_slug: Some("eat".to_string()),
                updated_at: updated,
            },
            ListingSitemapEntry {
                slug: "orphan".to_string(),
                category_slug: None,
                updated_at: updated,
            },
        ];
        let guides = vec![SeoPage {
            slug: "best-patios-in-squamish".to_string(),
            ..Default::default()
        }];

        let entries = build_sitemap(BASE, ["eat", "stay"], &listings, &guides, updated);
        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://bestseatosky.com",
                "https://bestseatosky.com/eat",
                "https://bestseatosky.com/stay",
                "https://bestseatosky.com/eat/purebread",
                "https://bestseatosky.com/eat/orphan",
                "https://bestseatosky.com/guide/best-patios-in-squamish",
            ]
        );
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[3].changefreq, ChangeFrequency::Weekly);
        assert_eq!(entries[3].lastmod, Some(updated));
        assert_eq!(entries[5].priority, 0.7);
        assert_eq!(entries[5].lastmod, None);
    }

    #[test]
    fn test_render_escapes_locations() {
        let xml = render_xml(&[SitemapEntry {
            loc: "https://x.test/a?b=1&c=2".to_string(),
            lastmod: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
            changefreq: ChangeFrequency::Daily,
            priority: 0.9,
        }]);
        assert!(xml.contains("<loc>https://x.test/a?b=1&amp;c=2</loc>"));
        assert!(xml.contains("<lastmod>2026-03-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
    }

    #[tokio::test]
    async fn test_load_lists_only_published_records() {
        let db = DBService::new_in_memory().await.unwrap();
        seed_directory(&db.pool).await.unwrap();

        let xml = load(&db.pool, BASE, ["eat", "stay", "play"]).await;
        assert!(xml.contains("<loc>https://bestseatosky.com/eat/purebread</loc>"));
        assert!(xml.contains("<loc>https://bestseatosky.com/stay/nita-lake-lodge</loc>"));
        assert!(xml.contains("<loc>https://bestseatosky.com/guide/best-eats</loc>"));
        assert!(!xml.contains("hidden-draft"));
        assert!(!xml.contains("draft-guide"));
    }
}
