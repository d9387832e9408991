use serde::{Deserialize, Serialize};

/// One search hit, in the order the backend ranked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Catalog key as delivered, possibly with a path prefix (`/works/OL1W`).
    pub identifier: String,
    pub title: String,
    pub author_names: Vec<String>,
    pub cover_image_url: Option<String>,
    pub first_publish_year: Option<i32>,
}

/// Full catalog record for a single work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetail {
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_urls: Vec<String>,
    pub subjects: Vec<String>,
    pub created: Option<String>,
}
