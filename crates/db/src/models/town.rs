use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS, Default, PartialEq)]
pub struct Town {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub display_order: i64,
}

impl Town {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Town>(
            r#"SELECT id, slug, name, description, latitude, longitude, display_order
               FROM towns
               ORDER BY display_order, name"#,
        )
        .fetch_all(pool)
        .await
    }
}
