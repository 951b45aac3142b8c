//! Name/role splitter
//!
//! Report cells describe people as free text such as
//! `"Maria Gomez Enfermería"`. The splitter finds the first catalog keyword
//! contained in the text and splits it into a person name and a canonical role.

use crate::normalize::NOT_AVAILABLE;
use serde::{Deserialize, Serialize};

/// Built-in role keywords, in match priority order.
///
/// Order is load-bearing: the first keyword contained in the text wins.
/// Diacritic variants are listed separately on purpose.
pub const DEFAULT_ROLES: &[&str] = &[
    "Auxiliar de laboratorio",
    "Bacteriólogo",
    "Bacteriologo",
    "Bacteriologo POCT",
    "Enfermería",
    "Enfermeria",
    "Profesional Enfermería",
    "Profesional Enfermeria",
    "Profesional",
];

/// A person name and role derived from one person-description line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRoleEntry {
    /// Person name, the text preceding the role keyword
    pub name: String,
    /// Canonical role as spelled in the catalog, or `"N/A"`
    pub role: String,
}

impl PersonRoleEntry {
    /// Entry used when there is nothing to split
    pub fn not_available() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            role: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Ordered list of recognized role keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog(Vec<String>);

impl RoleCatalog {
    /// Create a catalog from keywords in priority order
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(Into::into).collect())
    }

    /// Keywords in priority order
    pub fn keywords(&self) -> &[String] {
        &self.0
    }

    /// Number of keywords
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalog has no keywords
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split `text` using this catalog
    pub fn split(&self, text: &str) -> PersonRoleEntry {
        split_with(self.0.iter().map(String::as_str), text)
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ROLES.iter().copied())
    }
}

/// Split a person description with the built-in catalog.
///
/// # Examples
///
/// ```
/// use reportlab_domain::split_person_role;
///
/// let entry = split_person_role("Maria Gomez Enfermería");
/// assert_eq!(entry.name, "Maria Gomez");
/// assert_eq!(entry.role, "Enfermería");
/// ```
pub fn split_person_role(text: &str) -> PersonRoleEntry {
    split_with(DEFAULT_ROLES.iter().copied(), text)
}

fn split_with<'a>(keywords: impl Iterator<Item = &'a str>, text: &str) -> PersonRoleEntry {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return PersonRoleEntry::not_available();
    }

    // Plain substring containment, not word boundaries: a keyword that is the
    // tail of a longer word still matches.
    for keyword in keywords.filter(|k| !k.is_empty()) {
        if let Some(pos) = find_ignore_case(trimmed, keyword) {
            return PersonRoleEntry {
                name: trimmed[..pos].trim().to_string(),
                role: keyword.to_string(),
            };
        }
    }

    PersonRoleEntry {
        name: trimmed.to_string(),
        role: NOT_AVAILABLE.to_string(),
    }
}

/// Byte offset of the first case-insensitive occurrence of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .char_indices()
        .map(|(idx, _)| idx)
        .find(|&idx| starts_with_ignore_case(&haystack[idx..], needle))
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text_chars = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| text_chars.next() == Some(p))
}
