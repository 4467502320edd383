//! Defines the named style collection shared by a template and its documents.

use crate::error::StyleError;
use crate::style::Style;
use std::collections::HashMap;
use std::sync::Arc;

/// A case-insensitive mapping from style names and aliases to styles.
///
/// Keys are stored lower-cased. Aliases point at the canonical key, so
/// replacing an entry with merge semantics is visible through every alias.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    styles: HashMap<String, Arc<Style>>,
    aliases: HashMap<String, String>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a style by name or alias.
    pub fn get(&self, name: &str) -> Option<&Arc<Style>> {
        let key = key(name);
        let canonical = self.aliases.get(&key).unwrap_or(&key);
        self.styles.get(canonical)
    }

    /// Like [`Stylesheet::get`], failing with `UnknownStyle`.
    pub fn require(&self, name: &str) -> Result<&Arc<Style>, StyleError> {
        self.get(name)
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Inserts `style`, optionally reachable through `alias` as well.
    ///
    /// Without `merge`, a clash on the name or the alias fails with
    /// `DuplicateStyle`. With `merge`, an existing entry (found by name or
    /// alias) is replaced in place; it keeps its canonical name, key and
    /// aliases. An alias already bound to a different style is always a
    /// `DuplicateStyle`.
    pub fn add(
        &mut self,
        mut style: Style,
        alias: Option<&str>,
        merge: bool,
    ) -> Result<Arc<Style>, StyleError> {
        let name_key = key(&style.name);
        let alias_key = alias.map(key).filter(|a| *a != name_key);

        let existing = self.canonical_key(&name_key);
        if !merge && existing.is_some() {
            return Err(StyleError::DuplicateStyle(style.name.clone()));
        }
        let canonical = existing.unwrap_or(name_key);

        if let Some(alias_key) = &alias_key
            && let Some(bound) = self.canonical_key(alias_key)
            && (!merge || bound != canonical)
        {
            return Err(StyleError::DuplicateStyle(alias_key.clone()));
        }

        if let Some(current) = self.styles.get(&canonical) {
            style.name = current.name.clone();
        }
        let style = Arc::new(style);
        self.styles.insert(canonical.clone(), Arc::clone(&style));

        if let Some(alias_key) = alias_key
            && alias_key != canonical
        {
            self.aliases.insert(alias_key, canonical);
        }

        Ok(style)
    }

    /// Canonical key under which `key` (a name or alias) is stored.
    fn canonical_key(&self, key: &str) -> Option<String> {
        if self.styles.contains_key(key) {
            Some(key.to_string())
        } else {
            self.aliases.get(key).cloned()
        }
    }

    /// Canonical names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.values().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
