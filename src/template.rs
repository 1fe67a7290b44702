//! Placeholder substitution for configuration strings.
//!
//! A [`SubstitutionRegistry`] maps placeholder tokens such as `{{DATE}}` to
//! functions that rewrite a string containing them. Functions come in two
//! shapes (see [`Substitution`]): plain ones that only see the text, and
//! contextual ones that also receive a [`SubstitutionContext`] carrying the
//! current time.
//!
//! Substitution runs once per scrape over an enumerated set of fields
//! ([`Website::url`] and [`Website::separator`]); nested follow websites are
//! never substituted.
//!
//! # Placeholder keys
//!
//! Registered keys must be mutually non-overlapping: no key may be a
//! substring of another, and no key may end with the start of another (as
//! `{{X}}` and `}}{{` do). The registry is a hash map, so with overlapping
//! keys the result would depend on iteration order. [`SubstitutionRegistry::register`]
//! enforces this.

use crate::error::TemplateError;
use crate::models::Website;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt;

type PlainFn = dyn Fn(&str) -> String + Send + Sync;
type ContextualFn = dyn Fn(&str, &SubstitutionContext) -> String + Send + Sync;

/// Values handed to contextual substitutions.
#[derive(Debug, Clone)]
pub struct SubstitutionContext {
    pub now: DateTime<Local>,
}

impl SubstitutionContext {
    pub fn at(now: DateTime<Local>) -> Self {
        Self { now }
    }

    /// Context for the current local time.
    pub fn now() -> Self {
        Self::at(Local::now())
    }
}

/// A substitution function, in one of its two shapes.
///
/// The function receives the whole string and returns it with every
/// occurrence of its placeholder replaced.
pub enum Substitution {
    Plain(Box<PlainFn>),
    Contextual(Box<ContextualFn>),
}

impl Substitution {
    fn invoke(&self, text: &str, ctx: &SubstitutionContext) -> String {
        match self {
            Substitution::Plain(f) => f(text),
            Substitution::Contextual(f) => f(text, ctx),
        }
    }
}

impl fmt::Debug for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substitution::Plain(_) => f.write_str("Plain(..)"),
            Substitution::Contextual(_) => f.write_str("Contextual(..)"),
        }
    }
}

/// Placeholder token to substitution function.
#[derive(Debug, Default)]
pub struct SubstitutionRegistry {
    entries: HashMap<String, Substitution>,
}

impl SubstitutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the date placeholders:
    ///
    /// | Key | Output |
    /// |-----|--------|
    /// | `{{DATE}}` | `DD.MM.YYYY` |
    /// | `{{NUMERICAL_DATE}}` | `YYYY/MM/DD` |
    /// | `{{YEAR}}` | `YYYY` |
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (key, pattern) in [
            ("{{DATE}}", "%d.%m.%Y"),
            ("{{NUMERICAL_DATE}}", "%Y/%m/%d"),
            ("{{YEAR}}", "%Y"),
        ] {
            registry.entries.insert(
                key.to_string(),
                Substitution::Contextual(Box::new(move |text: &str, ctx: &SubstitutionContext| {
                    text.replace(key, &ctx.now.format(pattern).to_string())
                })),
            );
        }
        registry
    }

    /// Register `key`, rejecting keys that overlap an existing one.
    ///
    /// Re-registering an identical key replaces its function.
    pub fn register(&mut self, key: impl Into<String>, substitution: Substitution) -> Result<(), TemplateError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TemplateError::EmptyPlaceholder);
        }
        if let Some(existing) = self
            .entries
            .keys()
            .find(|existing| keys_overlap(existing, &key))
        {
            return Err(TemplateError::OverlappingPlaceholder {
                new: key,
                existing: existing.clone(),
            });
        }
        self.entries.insert(key, substitution);
        Ok(())
    }

    pub fn register_plain<F>(&mut self, key: impl Into<String>, f: F) -> Result<(), TemplateError>
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register(key, Substitution::Plain(Box::new(f)))
    }

    pub fn register_contextual<F>(&mut self, key: impl Into<String>, f: F) -> Result<(), TemplateError>
    where
        F: Fn(&str, &SubstitutionContext) -> String + Send + Sync + 'static,
    {
        self.register(key, Substitution::Contextual(Box::new(f)))
    }

    /// Register `{{name}}` as a fixed value.
    pub fn register_variable(&mut self, name: &str, value: impl Into<String>) -> Result<(), TemplateError> {
        let key = format!("{{{{{name}}}}}");
        let value = value.into();
        let placeholder = key.clone();
        self.register_plain(key, move |text| text.replace(&placeholder, &value))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every registered substitution whose key occurs in `text`.
    ///
    /// Strings containing no registered key are returned unchanged.
    pub fn substitute(&self, text: &str, ctx: &SubstitutionContext) -> String {
        let mut result = text.to_string();
        for (key, substitution) in &self.entries {
            if result.contains(key.as_str()) {
                result = substitution.invoke(&result, ctx);
            }
        }
        result
    }
}

/// Whether two distinct keys could match overlapping spans of one string.
fn keys_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    a.contains(b) || b.contains(a) || suffix_meets_prefix(a, b) || suffix_meets_prefix(b, a)
}

/// Whether a non-empty suffix of `a` is also a prefix of `b`.
fn suffix_meets_prefix(a: &str, b: &str) -> bool {
    (1..=a.len().min(b.len()))
        .filter(|&n| b.is_char_boundary(n))
        .any(|n| a.ends_with(&b[..n]))
}

/// Copy of `website` with its substitutable fields rewritten.
///
/// Only the website's own `url` and `separator` are touched; lookups and
/// their follow websites are copied as they are.
pub fn substitute_website(
    website: &Website,
    registry: &SubstitutionRegistry,
    ctx: &SubstitutionContext,
) -> Website {
    let mut parsed = website.clone();
    parsed.url = registry.substitute(&website.url, ctx);
    parsed.separator = registry.substitute(&website.separator, ctx);
    parsed
}
