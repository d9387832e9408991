use crate::error::CatalogError;
use crate::models::book::{BookDetail, BookSummary};
use serde::{Deserialize, Serialize};

pub const COVER_HOST: &str = "https://covers.openlibrary.org";
const UNTITLED: &str = "Untitled";

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub books: Option<Vec<BookRecord>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub work_id: String,
    pub title: Option<String>,
    pub author: Option<AuthorField>,
    pub cover: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    Many(Vec<String>),
    One(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub title: Option<String>,
    pub description: Option<TextField>,
    pub covers: Option<Vec<CoverField>>,
    pub subjects: Option<Vec<String>>,
    pub created: Option<TextField>,
}

/// Catalog text fields arrive either bare or wrapped as `{"type": ..., "value": ...}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Plain(String),
    Typed { value: String },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoverField {
    Url(String),
    Id(i64),
}

impl TextField {
    fn into_text(self) -> String {
        match self {
            TextField::Plain(text) | TextField::Typed { value: text } => text,
        }
    }
}

impl AuthorField {
    fn into_names(self) -> Vec<String> {
        let names = match self {
            AuthorField::Many(names) => names,
            AuthorField::One(joined) => joined.split(',').map(str::to_string).collect(),
        };

        names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

impl CoverField {
    fn into_url(self) -> Option<String> {
        match self {
            CoverField::Url(url) if !url.trim().is_empty() => Some(url),
            CoverField::Url(_) => None,
            CoverField::Id(id) if id > 0 => Some(cover_url_for_id(id)),
            CoverField::Id(_) => None,
        }
    }
}

pub fn cover_url_for_id(cover_id: i64) -> String {
    format!("{}/b/id/{}-L.jpg", COVER_HOST, cover_id)
}

impl BookRecord {
    pub fn into_summary(self) -> BookSummary {
        BookSummary {
            identifier: self.work_id,
            title: non_empty(self.title).unwrap_or_else(|| UNTITLED.to_string()),
            author_names: self.author.map(AuthorField::into_names).unwrap_or_default(),
            cover_image_url: non_empty(self.cover),
            first_publish_year: self.year,
        }
    }
}

impl DetailResponse {
    pub fn into_detail(self, key: &str) -> BookDetail {
        BookDetail {
            identifier: key.to_string(),
            title: non_empty(self.title).unwrap_or_else(|| UNTITLED.to_string()),
            description: non_empty(self.description.map(TextField::into_text)),
            cover_image_urls: self
                .covers
                .unwrap_or_default()
                .into_iter()
                .filter_map(CoverField::into_url)
                .collect(),
            subjects: self.subjects.unwrap_or_default(),
            created: non_empty(self.created.map(TextField::into_text)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Decodes a search body. Only the `{ "books": [...] }` envelope is accepted;
/// a bare array of catalog records is rejected rather than guessed at.
pub fn parse_search_body(body: &[u8]) -> Result<Vec<BookSummary>, CatalogError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(CatalogError::MalformedResponse(
            "expected an object with a 'books' field".to_string(),
        ));
    }

    let response: SearchResponse = serde_json::from_value(value)?;
    Ok(response
        .books
        .unwrap_or_default()
        .into_iter()
        .map(BookRecord::into_summary)
        .collect())
}

pub fn parse_detail_body(body: &[u8], key: &str) -> Result<BookDetail, CatalogError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(CatalogError::MalformedResponse(
            "expected a book record object".to_string(),
        ));
    }

    let response: DetailResponse = serde_json::from_value(value)?;
    Ok(response.into_detail(key))
}
