use std::collections::{HashMap, HashSet};

use crate::modules::provider::infrastructure::adapters::tmdb::models::TmdbGenre;
use crate::shared::domain::value_objects::CatalogFamily;

/// Immutable genre-name to genre-id snapshot for one catalog family
///
/// Snapshots are replaced whole; nothing mutates one after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreTaxonomy {
    family: CatalogFamily,
    by_name: HashMap<String, u32>,
}

impl GenreTaxonomy {
    /// Later duplicates of a name replace earlier ones
    pub fn new<I, S>(family: CatalogFamily, genres: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut by_name = HashMap::new();
        for (name, id) in genres {
            by_name.insert(name.into(), id);
        }
        Self { family, by_name }
    }

    pub fn from_genres(family: CatalogFamily, genres: &[TmdbGenre]) -> Self {
        Self::new(family, genres.iter().map(|g| (g.name.clone(), g.id)))
    }

    pub fn family(&self) -> CatalogFamily {
        self.family
    }

    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// Ids for the given names; unknown names are skipped
    pub fn ids_of(&self, names: &[&str]) -> HashSet<u32> {
        names.iter().filter_map(|name| self.id_of(name)).collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let taxonomy = GenreTaxonomy::new(
            CatalogFamily::Tv,
            [("Animation", 16), ("Drama", 18), ("Documentary", 99)],
        );

        assert_eq!(taxonomy.id_of("Drama"), Some(18));
        assert_eq!(taxonomy.id_of("Western"), None);
        assert_eq!(
            taxonomy.ids_of(&["Animation", "Documentary", "Western"]),
            HashSet::from([16, 99])
        );
        assert_eq!(taxonomy.len(), 3);
    }

    #[test]
    fn test_duplicate_names_keep_last_id() {
        let genres: Vec<TmdbGenre> = [10759, 10760]
            .into_iter()
            .map(|id| TmdbGenre {
                id,
                name: "Action & Adventure".into(),
            })
            .collect();
        let taxonomy = GenreTaxonomy::from_genres(CatalogFamily::Tv, &genres);
        assert_eq!(taxonomy.id_of("Action & Adventure"), Some(10760));
        assert_eq!(taxonomy.len(), 1);
    }
}
