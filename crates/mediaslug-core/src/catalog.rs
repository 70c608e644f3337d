use std::collections::HashMap;

use mediaslug_parse::MediaType;
use serde::Serialize;

use crate::error::SlugError;
use crate::slug::slugify;

/// A catalog title and the slug it is indexed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub slug: String,
    pub title: String,
}

/// Slug-keyed title storage the resolver looks titles up in.
///
/// Implementations index every title under `slugify(media_type, title)`.
pub trait SlugCatalog {
    fn media_type(&self) -> MediaType;

    /// Entries whose slug equals `slug`.
    fn find_exact(&self, slug: &str) -> Result<Vec<CatalogEntry>, SlugError>;

    /// Entries whose slug starts with `prefix`, including an exact match.
    fn find_prefix(&self, prefix: &str) -> Result<Vec<CatalogEntry>, SlugError>;

    /// Every entry, for strategies that have to scan.
    fn all_titles(&self) -> Result<Vec<CatalogEntry>, SlugError>;
}

/// In-memory catalog: exact index over a slug-sorted entry list.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    media_type: MediaType,
    entries: Vec<CatalogEntry>,
    exact_index: HashMap<String, Vec<usize>>,
}

impl MemoryCatalog {
    /// Index `titles`; titles with an empty slug are skipped.
    pub fn from_titles<I, S>(media_type: MediaType, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<CatalogEntry> = titles
            .into_iter()
            .filter_map(|title| {
                let title = title.as_ref().trim();
                let slug = slugify(media_type, title);
                (!slug.is_empty()).then(|| CatalogEntry {
                    slug,
                    title: title.to_string(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.slug.cmp(&b.slug));

        let mut exact_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            exact_index.entry(entry.slug.clone()).or_default().push(i);
        }

        tracing::debug!(
            media_type = %media_type,
            entries = entries.len(),
            slugs = exact_index.len(),
            "Catalog indexed"
        );

        Self {
            media_type,
            entries,
            exact_index,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SlugCatalog for MemoryCatalog {
    fn media_type(&self) -> MediaType {
        self.media_type
    }

    fn find_exact(&self, slug: &str) -> Result<Vec<CatalogEntry>, SlugError> {
        Ok(self
            .exact_index
            .get(slug)
            .map(|ids| ids.iter().map(|&i| self.entries[i].clone()).collect())
            .unwrap_or_default())
    }

    fn find_prefix(&self, prefix: &str) -> Result<Vec<CatalogEntry>, SlugError> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let start = self.entries.partition_point(|e| e.slug.as_str() < prefix);
        Ok(self.entries[start..]
            .iter()
            .take_while(|e| e.slug.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn all_titles(&self) -> Result<Vec<CatalogEntry>, SlugError> {
        Ok(self.entries.clone())
    }
}
