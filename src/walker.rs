//! Structure-preserving traversal of catalog documents.
//!
//! `walk` is the single traversal used everywhere: the dry leaf count and
//! unit collection are both built on it, so their visit order and count
//! always match the live pass.

use crate::document::Document;

/// A translatable leaf found during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Keys from the document root down to the leaf
    pub path: Vec<String>,
    /// Text of the leaf in the source language
    pub source: String,
}

impl TranslationUnit {
    /// Dotted form of the path (e.g. `marketing.hero.title`).
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Rebuild `doc`, replacing every string leaf with `visitor(text, path)`.
///
/// Mappings keep their key order, scalars pass through unchanged, and an
/// empty mapping stays empty.
pub fn walk<F>(doc: &Document, mut visitor: F) -> Document
where
    F: FnMut(&str, &[String]) -> String,
{
    let mut path = Vec::new();
    walk_node(doc, &mut path, &mut visitor)
}

fn walk_node<F>(node: &Document, path: &mut Vec<String>, visitor: &mut F) -> Document
where
    F: FnMut(&str, &[String]) -> String,
{
    match node {
        Document::Mapping(entries) => {
            let mut rebuilt = Vec::with_capacity(entries.len());
            for (key, child) in entries {
                path.push(key.clone());
                let child = walk_node(child, path, visitor);
                path.pop();
                rebuilt.push((key.clone(), child));
            }
            Document::Mapping(rebuilt)
        }
        Document::String(text) => Document::String(visitor(text, path)),
        Document::Scalar(value) => Document::Scalar(value.clone()),
    }
}

/// Dry pass: number of string leaves `walk` would visit.
pub fn count_leaves(doc: &Document) -> usize {
    let mut count = 0;
    walk(doc, |text, _| {
        count += 1;
        text.to_string()
    });
    count
}

/// Every string leaf with its path, in visit order.
pub fn collect_units(doc: &Document) -> Vec<TranslationUnit> {
    let mut units = Vec::new();
    walk(doc, |text, path| {
        units.push(TranslationUnit {
            path: path.to_vec(),
            source: text.to_string(),
        });
        text.to_string()
    });
    units
}
