pub mod blog_post;
pub mod category;
pub mod listing;
pub mod listing_request;
pub mod listing_tag;
pub mod publish_status;
pub mod seo_page;
pub mod tag;
pub mod town;
