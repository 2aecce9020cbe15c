use relative_path::RelativePath;

use siteconf_config::path::is_within;
use siteconf_config::RelPath;

use crate::error::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Page,
    Article,
}

/// Which source directories hold pages and which hold articles.
///
/// The most specific root containing a file decides its kind, so a page root of `""` and an
/// article root of `"nopath"` leave everything outside `nopath/` to pages.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContentPaths {
    pages: Vec<RelPath>,
    articles: Vec<RelPath>,
}

impl ContentPaths {
    pub fn new(pages: Vec<RelPath>, articles: Vec<RelPath>) -> Result<Self> {
        let pages = normalize_roots("page_paths", pages)?;
        let articles = normalize_roots("article_paths", articles)?;
        if let Some(shared) = pages.iter().find(|p| articles.contains(p)) {
            return Err(Error::PathOverlap {
                path: shared.to_string(),
            });
        }
        Ok(Self { pages, articles })
    }

    pub fn pages(&self) -> &[RelPath] {
        &self.pages
    }

    pub fn articles(&self) -> &[RelPath] {
        &self.articles
    }

    /// Classify a source file by its path relative to the content directory.
    pub fn classify(&self, path: &RelativePath) -> Option<ContentKind> {
        let path = path.normalize();
        let pages = self.pages.iter().map(|root| (ContentKind::Page, root));
        let articles = self.articles.iter().map(|root| (ContentKind::Article, root));
        pages
            .chain(articles)
            .filter(|(_, root)| is_within(&path, root))
            .max_by_key(|(_, root)| root.components().count())
            .map(|(kind, _)| kind)
    }
}

impl Default for ContentPaths {
    fn default() -> Self {
        Self {
            pages: vec![RelPath::from("pages")],
            articles: vec![RelPath::new()],
        }
    }
}

fn normalize_roots(field: &'static str, roots: Vec<RelPath>) -> Result<Vec<RelPath>> {
    let mut normalized: Vec<RelPath> = Vec::with_capacity(roots.len());
    for root in roots {
        let root = normalize_relative(field, &root)?;
        if !normalized.contains(&root) {
            normalized.push(root);
        }
    }
    Ok(normalized)
}

/// Normalize a project-relative path, rejecting ones that climb out of the project.
pub(crate) fn normalize_relative(field: &'static str, path: &RelativePath) -> Result<RelPath> {
    let normalized = path.normalize();
    if normalized
        .components()
        .any(|c| c == relative_path::Component::ParentDir)
    {
        return Err(Error::InvalidField {
            field,
            reason: format!("`{path}` is outside the project"),
        });
    }
    Ok(normalized)
}
