//! Keyword search across both providers
//!
//! TV and movie searches run concurrently with the comic search; results are
//! bucketed by the classifier, with animated films folded into the anime
//! bucket after the TV anime.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::{try_join, try_join3};

use crate::modules::catalog::{ContentClassifier, ContentItem, GenreCatalog, GenreTaxonomy};
use crate::modules::provider::{
    infrastructure::adapters::{anilist::models::MediaPage, tmdb::models::TmdbPage},
    CatalogRepository, ComicSearch, MediaGraphRepository,
};
use crate::modules::search::domain::entities::{BucketPage, SearchAllResponse};
use crate::shared::{
    application::pagination::{PageInfo, PageRequest, FIRST_PAGE},
    config::PagingSettings,
    domain::value_objects::{Bucket, CatalogFamily},
    errors::{AppError, AppResult},
    utils::logger::{LogContext, TimedOperation},
};

/// Comic search results with their paging position
struct ComicListing {
    info: PageInfo,
    items: Vec<ContentItem>,
}

pub struct SearchAggregator {
    repository: Arc<dyn CatalogRepository>,
    graph: Arc<dyn MediaGraphRepository>,
    catalog: GenreCatalog,
    locale: String,
    paging: PagingSettings,
}

impl SearchAggregator {
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        graph: Arc<dyn MediaGraphRepository>,
        catalog: GenreCatalog,
        locale: &str,
        paging: PagingSettings,
    ) -> Self {
        Self {
            repository,
            graph,
            catalog,
            locale: locale.to_string(),
            paging,
        }
    }

    /// First page of every bucket plus per-bucket "view more" flags
    pub async fn search_all(
        &self,
        keyword: &str,
        include_adult: bool,
    ) -> AppResult<SearchAllResponse> {
        let keyword = Self::normalize_keyword(keyword)?;
        let timer = TimedOperation::new(&format!("search_all '{}'", keyword));
        LogContext::search_operation(keyword, None, None);

        let comics_per_page = self.paging.comics_per_main_page;
        let ((tv_taxonomy, movie_taxonomy), (tv, movie, comics)) = try_join(
            self.catalog.taxonomies(),
            try_join3(
                self.catalog_search(CatalogFamily::Tv, keyword, FIRST_PAGE, include_adult),
                self.catalog_search(CatalogFamily::Movie, keyword, FIRST_PAGE, include_adult),
                self.comic_search(keyword, FIRST_PAGE, comics_per_page, include_adult),
            ),
        )
        .await?;

        let tv_items =
            ContentClassifier::classify_listing(CatalogFamily::Tv, &tv.results, &tv_taxonomy);
        let movie_items = ContentClassifier::classify_listing(
            CatalogFamily::Movie,
            &movie.results,
            &movie_taxonomy,
        );

        let (mut anime, drama): (Vec<_>, Vec<_>) = tv_items
            .into_iter()
            .partition(|item| item.bucket == Bucket::Anime);
        let (anime_movies, movies): (Vec<_>, Vec<_>) = movie_items
            .into_iter()
            .partition(|item| item.bucket == Bucket::Anime);
        anime.extend(anime_movies);

        let tv_more = Self::first_page_info(&tv).has_more();
        let movie_more = Self::first_page_info(&movie).has_more();
        let cap = self.paging.per_main_page;

        let response = SearchAllResponse {
            is_anime_view_more: tv_more || movie_more || anime.len() > cap,
            is_drama_view_more: tv_more || drama.len() > cap,
            is_movie_view_more: movie_more || movies.len() > cap,
            is_comics_view_more: comics.info.has_more(),
            anime: Self::truncate(anime, cap),
            drama: Self::truncate(drama, cap),
            movie: Self::truncate(movies, cap),
            comics: comics.items,
        };

        let total = response.anime.len()
            + response.drama.len()
            + response.movie.len()
            + response.comics.len();
        LogContext::search_operation(keyword, None, Some(total));
        timer.finish();
        Ok(response)
    }

    /// One page of a single bucket
    pub async fn search_bucket(
        &self,
        bucket: Bucket,
        keyword: &str,
        page: PageRequest,
        include_adult: bool,
    ) -> AppResult<BucketPage> {
        let keyword = Self::normalize_keyword(keyword)?;
        let scope = bucket.to_string();
        LogContext::search_operation(keyword, Some(&scope), None);

        let result = match bucket {
            Bucket::Anime => self.anime_page(keyword, page, include_adult).await?,
            Bucket::Drama | Bucket::Movie => {
                let family = if bucket == Bucket::Drama {
                    CatalogFamily::Tv
                } else {
                    CatalogFamily::Movie
                };
                let (taxonomy, listing) = try_join(
                    self.catalog.get_taxonomy(family),
                    self.catalog_search(family, keyword, page.page, include_adult),
                )
                .await?;
                let results = Self::only(
                    ContentClassifier::classify_listing(family, &listing.results, &taxonomy),
                    bucket,
                );
                BucketPage::new(
                    bucket,
                    PageInfo::new(page.page, listing.total_pages, listing.total_results),
                    results,
                )
            }
            Bucket::Comic => {
                let per_page = self.paging.comics_per_more_page;
                let comics = self
                    .comic_search(keyword, page.page, per_page, include_adult)
                    .await?;
                BucketPage::new(bucket, comics.info, comics.items)
            }
        };

        LogContext::search_operation(keyword, Some(&scope), Some(result.results.len()));
        Ok(result)
    }

    /// Title suggestions from the combined search
    ///
    /// Distinct names, sorted, with names starting with the keyword first.
    pub async fn suggest_keywords(
        &self,
        keyword: &str,
        include_adult: bool,
    ) -> AppResult<Vec<String>> {
        let keyword = Self::normalize_keyword(keyword)?;

        let (taxonomies, listing) = try_join(self.catalog.taxonomies(), async {
            match self
                .repository
                .multi_search(keyword, FIRST_PAGE, &self.locale, include_adult)
                .await
            {
                Ok(listing) => Ok(listing),
                Err(e) if e.is_not_found() => Ok(TmdbPage::empty(FIRST_PAGE)),
                Err(e) => Err(AppError::Upstream(e)),
            }
        })
        .await?;
        let (tv_taxonomy, _) = taxonomies;

        let names: BTreeSet<&str> = listing
            .results
            .iter()
            .filter(|item| {
                Self::is_suggestible(item.media_type.as_deref(), item.genre_ids(), &tv_taxonomy)
            })
            .filter_map(|item| item.display_title())
            .filter(|name| !name.is_empty())
            .collect();

        let lowered = keyword.to_lowercase();
        let (mut suggestions, others): (Vec<String>, Vec<String>) = names
            .into_iter()
            .map(str::to_string)
            .partition(|name| name.to_lowercase().starts_with(&lowered));
        suggestions.extend(others);
        suggestions.truncate(self.paging.autocomplete_count);

        LogContext::search_operation(keyword, Some("suggestions"), Some(suggestions.len()));
        Ok(suggestions)
    }

    async fn anime_page(
        &self,
        keyword: &str,
        page: PageRequest,
        include_adult: bool,
    ) -> AppResult<BucketPage> {
        let ((tv_taxonomy, movie_taxonomy), (tv, movie)) = try_join(
            self.catalog.taxonomies(),
            try_join(
                self.catalog_search(CatalogFamily::Tv, keyword, page.page, include_adult),
                self.catalog_search(CatalogFamily::Movie, keyword, page.page, include_adult),
            ),
        )
        .await?;

        let mut results = Self::only(
            ContentClassifier::classify_listing(CatalogFamily::Tv, &tv.results, &tv_taxonomy),
            Bucket::Anime,
        );
        let movie_items = ContentClassifier::classify_listing(
            CatalogFamily::Movie,
            &movie.results,
            &movie_taxonomy,
        );
        results.extend(Self::only(movie_items, Bucket::Anime));

        let info = PageInfo::new(
            page.page,
            tv.total_pages.max(movie.total_pages),
            tv.total_results.saturating_add(movie.total_results),
        );
        Ok(BucketPage::new(Bucket::Anime, info, results))
    }

    async fn catalog_search(
        &self,
        family: CatalogFamily,
        keyword: &str,
        page: u32,
        include_adult: bool,
    ) -> AppResult<TmdbPage> {
        match self
            .repository
            .search(family, keyword, page, &self.locale, include_adult)
            .await
        {
            Ok(listing) => Ok(listing),
            Err(e) if e.is_not_found() => Ok(TmdbPage::empty(page)),
            Err(e) => Err(AppError::Upstream(e)),
        }
    }

    async fn comic_search(
        &self,
        keyword: &str,
        page: u32,
        per_page: u32,
        include_adult: bool,
    ) -> AppResult<ComicListing> {
        let search = ComicSearch::new(keyword, page, per_page, include_adult);
        let media_page = match self.graph.comic_search(search).await {
            Ok(media_page) => media_page,
            Err(e) if e.is_not_found() => MediaPage::default(),
            Err(e) => return Err(AppError::Upstream(e)),
        };

        let items: Vec<ContentItem> = media_page
            .media
            .iter()
            .flatten()
            .filter_map(ContentItem::from_comic)
            .collect();
        let info = match &media_page.page_info {
            Some(info) => PageInfo::new(
                info.current_page.unwrap_or(page),
                info.last_page.unwrap_or(0),
                info.total.unwrap_or(0),
            ),
            None => PageInfo::empty(page),
        };
        Ok(ComicListing { info, items })
    }

    fn is_suggestible(
        media_type: Option<&str>,
        genre_ids: &[u32],
        tv_taxonomy: &GenreTaxonomy,
    ) -> bool {
        if genre_ids.is_empty() {
            return false;
        }
        match media_type {
            Some("tv") => ContentClassifier::is_suggestible_tv(genre_ids, tv_taxonomy),
            Some("movie") => true,
            _ => false,
        }
    }

    fn first_page_info(listing: &TmdbPage) -> PageInfo {
        PageInfo::new(FIRST_PAGE, listing.total_pages, listing.total_results)
    }

    fn only(items: Vec<ContentItem>, bucket: Bucket) -> Vec<ContentItem> {
        items.into_iter().filter(|item| item.bucket == bucket).collect()
    }

    fn truncate(mut items: Vec<ContentItem>, cap: usize) -> Vec<ContentItem> {
        items.truncate(cap);
        items
    }

    fn normalize_keyword(keyword: &str) -> AppResult<&str> {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError("Search keyword is empty".to_string()));
        }
        Ok(trimmed)
    }
}
