//! Fixture builders for tests. The directory schema has no write path outside lead intake,
//! so seeding goes straight to SQL.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::publish_status::PublishStatus;

pub async fn insert_category(
    pool: &SqlitePool,
    slug: &str,
    name: &str,
    display_order: i64,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO categories (id, slug, name, description, display_order) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(slug)
    .bind(name)
    .bind(format!("{name} across the Sea to Sky"))
    .bind(display_order)
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn insert_town(
    pool: &SqlitePool,
    slug: &str,
    name: &str,
    display_order: i64,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO towns (id, slug, name, display_order) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(slug)
        .bind(name)
        .bind(display_order)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn insert_tag(
    pool: &SqlitePool,
    category_id: Uuid,
    slug: &str,
    name: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO tags (id, slug, name, category_id) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(slug)
        .bind(name)
        .bind(category_id)
        .execute(pool)
        .await?;
    Ok(id)
}

/// Listing row to insert; start from [`NewListing::published`] and override fields.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub slug: String,
    pub name: String,
    pub category_id: Uuid,
    pub town_id: Option<Uuid>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub price_level: Option<i32>,
    pub status: PublishStatus,
    pub featured: bool,
    pub website: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub schema_json: Option<String>,
    pub tag_ids: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl NewListing {
    pub fn published(slug: &str, name: &str, category_id: Uuid) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            category_id,
            town_id: None,
            rating: None,
            review_count: None,
            price_level: Some(2),
            status: PublishStatus::Published,
            featured: false,
            website: None,
            address: None,
            phone: None,
            schema_json: None,
            tag_ids: Vec::new(),
            updated_at: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
        }
    }

    pub fn in_town(mut self, town_id: Uuid) -> Self {
        self.town_id = Some(town_id);
        self
    }

    pub fn rated(mut self, rating: f64, review_count: i64) -> Self {
        self.rating = Some(rating);
        self.review_count = Some(review_count);
        self
    }

    pub fn tagged(mut self, tag_ids: &[Uuid]) -> Self {
        self.tag_ids = tag_ids.to_vec();
        self
    }

    pub fn draft(mut self) -> Self {
        self.status = PublishStatus::Draft;
        self
    }
}

pub async fn insert_listing(pool: &SqlitePool, listing: &NewListing) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"INSERT INTO listings
               (id, slug, name, description, short_description, category_id, town_id,
                address, phone, website, price_level, google_rating, google_review_count,
                schema_json, status, featured, updated_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)"#,
    )
    .bind(id)
    .bind(&listing.slug)
    .bind(&listing.name)
    .bind(format!("{} is a Sea to Sky favourite.", listing.name))
    .bind(format!("{} in brief", listing.name))
    .bind(listing.category_id)
    .bind(listing.town_id)
    .bind(&listing.address)
    .bind(&listing.phone)
    .bind(&listing.website)
    .bind(listing.price_level)
    .bind(listing.rating)
    .bind(listing.review_count)
    .bind(&listing.schema_json)
    .bind(listing.status)
    .bind(listing.featured)
    .bind(listing.updated_at)
    .execute(pool)
    .await?;

    for tag_id in &listing.tag_ids {
        sqlx::query("INSERT INTO listing_tags (listing_id, tag_id) VALUES ($1, $2)")
            .bind(id)
            .bind(tag_id)
            .execute(pool)
            .await?;
    }
    Ok(id)
}

/// Guide row to insert.
#[derive(Debug, Clone, Default)]
pub struct NewSeoPage {
    pub slug: String,
    pub title: String,
    pub category_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    pub town_id: Option<Uuid>,
    pub schema_json: Option<String>,
    pub status: PublishStatus,
}

impl NewSeoPage {
    pub fn published(slug: &str, title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            status: PublishStatus::Published,
            ..Default::default()
        }
    }
}

pub async fn insert_seo_page(pool: &SqlitePool, page: &NewSeoPage) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"INSERT INTO seo_pages
               (id, slug, title, meta_description, intro_content,
                category_id, tag_id, town_id, schema_json, status)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
    )
    .bind(id)
    .bind(&page.slug)
    .bind(&page.title)
    .bind(format!("{} in the Sea to Sky corridor.", page.title))
    .bind(format!("Our picks for {}.", page.title.to_lowercase()))
    .bind(page.category_id)
    .bind(page.tag_id)
    .bind(page.town_id)
    .bind(&page.schema_json)
    .bind(page.status)
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn insert_blog_post(
    pool: &SqlitePool,
    slug: &str,
    title: &str,
    status: PublishStatus,
    published_at: Option<DateTime<Utc>>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"INSERT INTO blog_posts (id, slug, title, excerpt, content, author, status, published_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
    )
    .bind(id)
    .bind(slug)
    .bind(title)
    .bind(format!("{title}: the short version."))
    .bind(format!("<p>{title}</p>"))
    .bind("Best Sea to Sky")
    .bind(status)
    .bind(published_at)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Ids of everything [`seed_directory`] inserted, looked up by slug.
#[derive(Debug, Default)]
pub struct SeededDirectory {
    pub categories: HashMap<String, Uuid>,
    pub towns: HashMap<String, Uuid>,
    pub tags: HashMap<String, Uuid>,
    pub listings: HashMap<String, Uuid>,
    pub guides: HashMap<String, Uuid>,
}

impl SeededDirectory {
    pub fn category(&self, slug: &str) -> Uuid {
        self.categories[slug]
    }

    pub fn town(&self, slug: &str) -> Uuid {
        self.towns[slug]
    }

    pub fn tag(&self, slug: &str) -> Uuid {
        self.tags[slug]
    }

    pub fn listing(&self, slug: &str) -> Uuid {
        self.listings[slug]
    }
}

/// A small corridor directory:
///
/// | listing                     | category | town      | rating/reviews | tags           |
/// |-----------------------------|----------|-----------|----------------|----------------|
/// | purebread                   | eat      | whistler  | 4.8 / 3000     | brunch, vegan  |
/// | watershed-grill (featured)  | eat      | squamish  | 4.6 / 1200     | patio          |
/// | fergies-cafe                | eat      | squamish  | 4.6 / 900      | brunch, patio  |
/// | pemberton-distillery-bistro | eat      | pemberton | 4.2 / 150      |                |
/// | no-town-taco                | eat      | -         | -              | vegan          |
/// | hidden-draft (draft)        | eat      | squamish  | 4.9 / 50       | patio          |
/// | nita-lake-lodge (featured)  | stay     | whistler  | 4.7 / 1500     | hot-tub        |
/// | sea-to-sky-hotel            | stay     | squamish  | 4.1 / 800      | hot-tub        |
/// | sea-to-sky-gondola          | play     | squamish  | 4.8 / 9000     |                |
///
/// Guides: `best-patios-in-squamish` (eat + patio + squamish), `best-eats` (eat),
/// `late-night-eats` (tag with no listings), `top-picks` (no constraints) and a draft.
/// Blog: `spring-in-squamish` (published) and `unfinished-post` (draft).
pub async fn seed_directory(pool: &SqlitePool) -> Result<SeededDirectory, sqlx::Error> {
    let mut seed = SeededDirectory::default();

    for (order, (slug, name)) in [("eat", "Eat"), ("stay", "Stay"), ("play", "Play")]
        .into_iter()
        .enumerate()
    {
        let id = insert_category(pool, slug, name, order as i64).await?;
        seed.categories.insert(slug.to_string(), id);
    }

    for (order, (slug, name)) in [
        ("squamish", "Squamish"),
        ("whistler", "Whistler"),
        ("pemberton", "Pemberton"),
    ]
    .into_iter()
    .enumerate()
    {
        let id = insert_town(pool, slug, name, order as i64).await?;
        seed.towns.insert(slug.to_string(), id);
    }

    let eat = seed.category("eat");
    let stay = seed.category("stay");
    let play = seed.category("play");
    for (category_id, slug, name) in [
        (eat, "brunch", "Brunch"),
        (eat, "patio", "Patio"),
        (eat, "vegan", "Vegan"),
        (eat, "late-night", "Late Night"),
        (stay, "hot-tub", "Hot Tub"),
    ] {
        let id = insert_tag(pool, category_id, slug, name).await?;
        seed.tags.insert(slug.to_string(), id);
    }

    let squamish = seed.town("squamish");
    let whistler = seed.town("whistler");
    let pemberton = seed.town("pemberton");
    let listings = [
        NewListing::published("purebread", "Purebread", eat)
            .in_town(whistler)
            .rated(4.8, 3000)
            .tagged(&[seed.tag("brunch"), seed.tag("vegan")]),
        NewListing {
            featured: true,
            website: Some("watershedgrill.com".to_string()),
            address: Some("41101 Government Rd, Brackendale".to_string()),
            phone: Some("604-898-6665".to_string()),
            ..NewListing::published("watershed-grill", "Watershed Grill", eat)
                .in_town(squamish)
                .rated(4.6, 1200)
                .tagged(&[seed.tag("patio")])
        },
        NewListing::published("fergies-cafe", "Fergie's Cafe", eat)
            .in_town(squamish)
            .rated(4.6, 900)
            .tagged(&[seed.tag("brunch"), seed.tag("patio")]),
        NewListing::published(
            "pemberton-distillery-bistro",
            "Pemberton Distillery Bistro",
            eat,
        )
        .in_town(pemberton)
        .rated(4.2, 150),
        NewListing {
            price_level: Some(0),
            ..NewListing::published("no-town-taco", "No Town Taco", eat)
                .tagged(&[seed.tag("vegan")])
        },
        NewListing::published("hidden-draft", "Hidden Draft", eat)
            .in_town(squamish)
            .rated(4.9, 50)
            .tagged(&[seed.tag("patio")])
            .draft(),
        NewListing {
            featured: true,
            schema_json: Some(r#"{"@type":"Hotel","name":"Nita Lake Lodge"}"#.to_string()),
            ..NewListing::published("nita-lake-lodge", "Nita Lake Lodge", stay)
                .in_town(whistler)
                .rated(4.7, 1500)
                .tagged(&[seed.tag("hot-tub")])
        },
        NewListing::published("sea-to-sky-hotel", "Sea to Sky Hotel", stay)
            .in_town(squamish)
            .rated(4.1, 800)
            .tagged(&[seed.tag("hot-tub")]),
        NewListing::published("sea-to-sky-gondola", "Sea to Sky Gondola", play)
            .in_town(squamish)
            .rated(4.8, 9000),
    ];
    for listing in &listings {
        let id = insert_listing(pool, listing).await?;
        seed.listings.insert(listing.slug.clone(), id);
    }

    let guides = [
        NewSeoPage {
            category_id: Some(eat),
            tag_id: Some(seed.tag("patio")),
            town_id: Some(squamish),
            ..NewSeoPage::published("best-patios-in-squamish", "Best Patios in Squamish")
        },
        NewSeoPage {
            category_id: Some(eat),
            ..NewSeoPage::published("best-eats", "Best Eats")
        },
        NewSeoPage {
            tag_id: Some(seed.tag("late-night")),
            ..NewSeoPage::published("late-night-eats", "Late Night Eats")
        },
        NewSeoPage::published("top-picks", "Top Picks"),
        NewSeoPage {
            status: PublishStatus::Draft,
            ..NewSeoPage::published("draft-guide", "Draft Guide")
        },
    ];
    for guide in &guides {
        let id = insert_seo_page(pool, guide).await?;
        seed.guides.insert(guide.slug.clone(), id);
    }

    insert_blog_post(
        pool,
        "spring-in-squamish",
        "Spring in Squamish",
        PublishStatus::Published,
        Some(Utc.with_ymd_and_hms(2026, 3, 20, 9, 0, 0).unwrap()),
    )
    .await?;
    insert_blog_post(
        pool,
        "unfinished-post",
        "Unfinished Post",
        PublishStatus::Draft,
        None,
    )
    .await?;

    Ok(seed)
}
