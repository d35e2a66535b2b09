//! Geosearch response types.
//!
//! The API answers `{"query": {"pages": {"<id>": {...}, ...}}}`. Pages are
//! decoded in document order; a response with no `query` object means there
//! was nothing nearby.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Description shown for pages that carry no usable description term.
pub const FALLBACK_DESCRIPTION: &str = "No further information";

#[derive(Debug, Deserialize)]
pub(crate) struct GeoSearchResponse {
    #[serde(default)]
    pub query: Option<GeoSearchQuery>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeoSearchQuery {
    #[serde(deserialize_with = "pages_in_document_order")]
    pub pages: Vec<Page>,
}

impl GeoSearchResponse {
    pub(crate) fn into_pages(self) -> Vec<Page> {
        self.query.map(|q| q.pages).unwrap_or_default()
    }
}

/// One nearby Wikipedia page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page {
    pub pageid: i64,
    pub title: String,
    #[serde(default, deserialize_with = "PageDescription::from_terms")]
    pub terms: PageDescription,
}

impl Page {
    /// The page's description, or [`FALLBACK_DESCRIPTION`].
    #[must_use]
    pub fn description(&self) -> &str {
        self.terms.text()
    }
}

/// The `description` entry of a page's optional `terms` map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageDescription {
    /// First string of a non-empty `description` list.
    Present(String),
    /// `description` listed with no strings.
    Empty,
    /// No `terms`, `terms: null`, or no `description` key.
    #[default]
    Absent,
}

impl PageDescription {
    fn from_terms<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let terms = Option::<HashMap<String, Vec<String>>>::deserialize(deserializer)?;
        let description = terms.and_then(|mut t| t.remove("description"));
        Ok(match description.map(Vec::into_iter).map(|mut it| it.next()) {
            None => PageDescription::Absent,
            Some(None) => PageDescription::Empty,
            Some(Some(first)) => PageDescription::Present(first),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            PageDescription::Present(text) => text,
            PageDescription::Empty | PageDescription::Absent => FALLBACK_DESCRIPTION,
        }
    }
}

/// Sorts by title, byte-wise ascending; equal titles keep their order.
pub fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| a.title.cmp(&b.title));
}

fn pages_in_document_order<'de, D>(deserializer: D) -> Result<Vec<Page>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PagesVisitor;

    impl<'de> Visitor<'de> for PagesVisitor {
        type Value = Vec<Page>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of page id to page")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pages = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_id, page)) = map.next_entry::<String, Page>()? {
                pages.push(page);
            }
            Ok(pages)
        }
    }

    deserializer.deserialize_map(PagesVisitor)
}
