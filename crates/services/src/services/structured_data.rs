//! schema.org JSON-LD objects embedded in rendered pages.

use db::models::{blog_post::BlogPost, listing::Listing, seo_page::SeoPage};
use serde_json::{Map, Value, json};

const SCHEMA_CONTEXT: &str = "https://schema.org";
const SITE_NAME: &str = "Best Sea to Sky";
const CATEGORY_LIST_ITEMS: usize = 20;
const GUIDE_DESCRIPTION_CHARS: usize = 155;

/// `{base_url}/{category}/{slug}`.
pub fn listing_url(base_url: &str, category_slug: &str, listing_slug: &str) -> String {
    format!("{base_url}/{category_slug}/{listing_slug}")
}

/// "Free" for price level 0, otherwise one `$` per level.
pub fn price_range(price_level: Option<i32>) -> Option<String> {
    match price_level {
        Some(0) => Some("Free".to_string()),
        Some(level) if level > 0 => Some("$".repeat(level as usize)),
        _ => None,
    }
}

/// `LocalBusiness` (or the listing's own schema type) for a listing detail page.
/// A valid `schema_json` override replaces the generated object.
pub fn listing_schema(listing: &Listing, base_url: &str, category_slug: &str) -> Value {
    if let Some(schema) = listing.parsed_schema() {
        return schema;
    }

    let mut schema = Map::new();
    schema.insert("@context".into(), json!(SCHEMA_CONTEXT));
    schema.insert(
        "@type".into(),
        json!(listing.schema_type.as_deref().unwrap_or("LocalBusiness")),
    );
    schema.insert("name".into(), json!(listing.name));
    schema.insert("description".into(), json!(listing.description));
    schema.insert(
        "address".into(),
        json!({
            "@type": "PostalAddress",
            "streetAddress": listing.address,
            "addressLocality": listing.town_name.as_deref().unwrap_or("Sea to Sky"),
            "addressRegion": "BC",
            "addressCountry": "CA",
        }),
    );
    if let (Some(rating), Some(count)) = (listing.google_rating, listing.google_review_count) {
        if rating > 0.0 && count > 0 {
            schema.insert("aggregateRating".into(), aggregate_rating(rating, count));
        }
    }
    if let Some(phone) = &listing.phone {
        schema.insert("telephone".into(), json!(phone));
    }
    schema.insert(
        "url".into(),
        json!(listing_url(base_url, category_slug, &listing.slug)),
    );
    if let Some(range) = price_range(listing.price_level) {
        schema.insert("priceRange".into(), json!(range));
    }
    if let Some(website) = &listing.website {
        schema.insert("sameAs".into(), json!([website]));
    }
    if let Some(image) = &listing.featured_image_url {
        schema.insert("image".into(), json!(image));
    }
    Value::Object(schema)
}

/// `ItemList` of the first listings on a category page.
pub fn category_item_list(
    title: &str,
    description: Option<&str>,
    category_slug: &str,
    listings: &[Listing],
    base_url: &str,
) -> Value {
    let items: Vec<Value> = listings
        .iter()
        .take(CATEGORY_LIST_ITEMS)
        .enumerate()
        .map(|(i, listing)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": listing.name,
                "url": listing_url(base_url, category_slug, &listing.slug),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ItemList",
        "name": title,
        "description": description,
        "numberOfItems": listings.len(),
        "itemListElement": items,
    })
}

/// Ranked `ItemList` of businesses for a guide, unless the guide carries its own schema.
pub fn guide_schema(page: &SeoPage, listings: &[Listing]) -> Value {
    if let Some(schema) = page.parsed_schema() {
        return schema;
    }

    let items: Vec<Value> = listings
        .iter()
        .enumerate()
        .map(|(i, listing)| {
            let mut item = Map::new();
            item.insert("@type".into(), json!("LocalBusiness"));
            item.insert("name".into(), json!(listing.name));
            item.insert("description".into(), json!(guide_description(listing)));
            item.insert("address".into(), json!(listing.address));
            if let Some(rating) = listing.google_rating.filter(|r| *r > 0.0) {
                item.insert(
                    "aggregateRating".into(),
                    aggregate_rating(rating, listing.google_review_count.unwrap_or(0)),
                );
            }
            if let Some(website) = &listing.website {
                item.insert("url".into(), json!(website));
            }
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": Value::Object(item),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ItemList",
        "name": page.title,
        "description": page.meta_description,
        "numberOfItems": listings.len(),
        "itemListElement": items,
    })
}

pub fn blog_post_schema(post: &BlogPost, base_url: &str) -> Value {
    let description = post.meta_description.as_ref().or(post.excerpt.as_ref());
    let mut schema = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Article",
        "headline": post.title,
        "description": description,
        "author": {
            "@type": "Organization",
            "name": post.author.as_deref().unwrap_or(SITE_NAME),
        },
        "datePublished": post.published_at,
        "dateModified": post.updated_at,
        "publisher": {
            "@type": "Organization",
            "name": SITE_NAME,
            "url": base_url,
        },
        "mainEntityOfPage": format!("{base_url}/blog/{}", post.slug),
    });
    if let (Some(image), Some(obj)) = (&post.featured_image, schema.as_object_mut()) {
        obj.insert("image".into(), json!(image));
    }
    schema
}

fn aggregate_rating(rating: f64, review_count: i64) -> Value {
    json!({
        "@type": "AggregateRating",
        "ratingValue": rating,
        "reviewCount": review_count,
    })
}

fn guide_description(listing: &Listing) -> Option<String> {
    listing
        .short_description
        .clone()
        .filter(|d| !d.is_empty())
        .or_else(|| {
            listing
                .description
                .as_ref()
                .map(|d| d.chars().take(GUIDE_DESCRIPTION_CHARS).collect())
        })
}
