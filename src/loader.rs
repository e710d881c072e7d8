//! Loading JSON translation documents into trees.
//!
//! Translation catalogs usually ship as one JSON document per locale, all
//! sharing the same nested key structure. A document converts into a
//! [`LocalePatch`] — objects become branches, strings and other scalars
//! become values — and merging one patch per locale through
//! [`patch_locale`] builds a single tree whose items carry every loaded
//! tag.

use serde_json::Value;

use crate::{
    patch::{LocalePatch, LocalePatchNode, PatchError, patch_locale},
    tree::{Branch, TranslationTree},
};

/// Error loading translation documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A document root was something other than a JSON object.
    #[error("translation document for '{locale}' must be a JSON object, found {found}")]
    NotAnObject {
        /// Locale tag the document was loaded for.
        locale: String,
        /// JSON kind actually found at the root.
        found: &'static str,
    },
    /// A document's shape disagrees with the tree built from earlier
    /// documents.
    #[error("cannot merge translations for '{locale}'")]
    Merge {
        /// Locale tag of the conflicting document.
        locale: String,
        /// The underlying shape mismatch.
        #[source]
        source: PatchError,
    },
}

/// Converts one locale's JSON document into a [`LocalePatch`].
///
/// Objects become nested patches and strings become values. Numbers and
/// booleans are stringified; `null` entries are skipped with a warning.
/// Arrays turn into branches keyed by decimal index, so `"list": ["a"]`
/// is read back as `list.0`.
pub fn locale_patch_from_json(
    locale: &str,
    document: &Value,
) -> Result<LocalePatch<String>, LoadError> {
    match document {
        Value::Object(map) => {
            let mut path = Vec::new();
            Ok(patch_from_object(map, &mut path))
        }
        other => Err(LoadError::NotAnObject {
            locale: locale.to_owned(),
            found: json_kind(other),
        }),
    }
}

/// Builds a translation tree from `(locale, document)` pairs.
///
/// Documents are merged in iteration order; later documents only add their
/// locale's values and never remove entries loaded before. The `"fallback"`
/// tag may be loaded like any other locale to provide last-resort values.
pub fn tree_from_documents<I, L>(documents: I) -> Result<TranslationTree<String>, LoadError>
where
    I: IntoIterator<Item = (L, Value)>,
    L: Into<String>,
{
    let tree = TranslationTree::new(Branch::new());
    let view = tree.view();
    for (locale, document) in documents {
        let locale = locale.into();
        let patch = locale_patch_from_json(&locale, &document)?;
        patch_locale(&view, Some(&locale), patch).map_err(|source| LoadError::Merge {
            locale: locale.clone(),
            source,
        })?;
    }
    Ok(tree)
}

fn patch_from_object(
    map: &serde_json::Map<String, Value>,
    path: &mut Vec<String>,
) -> LocalePatch<String> {
    let mut patch = LocalePatch::new();
    for (key, child) in map {
        path.push(key.clone());
        if let Some(node) = node_from_value(child, path) {
            patch.push_entry(key.clone(), node);
        }
        path.pop();
    }
    patch
}

fn node_from_value(value: &Value, path: &mut Vec<String>) -> Option<LocalePatchNode<String>> {
    match value {
        Value::Object(map) => Some(LocalePatchNode::Branch(patch_from_object(map, path))),
        Value::Array(items) => {
            let mut patch = LocalePatch::new();
            for (index, child) in items.iter().enumerate() {
                let key = index.to_string();
                path.push(key.clone());
                if let Some(node) = node_from_value(child, path) {
                    patch.push_entry(key, node);
                }
                path.pop();
            }
            Some(LocalePatchNode::Branch(patch))
        }
        Value::String(text) => Some(LocalePatchNode::Value(text.clone())),
        Value::Null => {
            tracing::warn!("Ignoring null translation value at: {}", path.join("."));
            None
        }
        other => Some(LocalePatchNode::Value(other.to_string())),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
