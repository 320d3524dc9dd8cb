use pagecraft_document::{load, Document, IdGenerator};
use serde::{Deserialize, Serialize};

/// Page as the backend stores it: content is a JSON string (or legacy text)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub order: i64,
}

/// Page being edited, with its content loaded into a document
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub id: Option<u64>,
    pub title: String,
    pub slug: String,
    pub content: Document,
    pub published: bool,
    pub order: i64,
}

impl PageRecord {
    pub fn from_stored(stored: StoredPage, ids: &mut IdGenerator) -> Self {
        let content = load(stored.content.as_deref(), ids);

        Self {
            id: stored.id,
            title: stored.title,
            slug: stored.slug,
            content,
            published: stored.published,
            order: stored.order,
        }
    }

    /// Submit form: the document is serialized back to a string
    pub fn to_stored(&self) -> Result<StoredPage, serde_json::Error> {
        Ok(StoredPage {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: Some(self.content.to_json()?),
            published: self.published,
            order: self.order,
        })
    }
}
