pub mod category_style;
pub mod guide_selector;
pub mod lead_intake;
pub mod listing_filter;
pub mod notification;
pub mod related_listings;
pub mod search;
pub mod sitemap;
pub mod structured_data;
