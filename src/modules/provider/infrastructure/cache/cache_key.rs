use std::fmt;

use crate::shared::domain::value_objects::Provider;

/// Ordered cache key: (provider, operation, locale, page, entity)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub provider: Provider,
    pub operation: &'static str,
    pub locale: Option<String>,
    pub page: Option<u32>,
    pub entity: Option<String>,
    pub include_adult: Option<bool>,
}

impl CacheKey {
    pub fn new(provider: Provider, operation: &'static str) -> Self {
        Self {
            provider,
            operation,
            locale: None,
            page: None,
            entity: None,
            include_adult: None,
        }
    }

    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn entity(mut self, entity: impl fmt::Display) -> Self {
        self.entity = Some(entity.to_string());
        self
    }

    /// Free-text entity, normalized so casing and surrounding whitespace share an entry
    pub fn query(mut self, query: &str) -> Self {
        let trimmed = query.trim();
        let mut normalized = String::with_capacity(trimmed.len());
        for ch in trimmed.chars() {
            normalized.extend(ch.to_lowercase());
        }
        self.entity = Some(normalized);
        self
    }

    pub fn adult(mut self, include_adult: bool) -> Self {
        self.include_adult = Some(include_adult);
        self
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.operation)?;
        if let Some(locale) = &self.locale {
            write!(f, ":{}", locale)?;
        }
        if let Some(page) = self.page {
            write!(f, ":p{}", page)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, ":{}", entity)?;
        }
        if let Some(adult) = self.include_adult {
            write!(f, ":adult={}", adult)?;
        }
        Ok(())
    }
}
