//! Recommendation fallback chain for catalog titles
//!
//! `PrimaryLocale -> FallbackLocale -> SimilarTitles -> Done`. Each step runs
//! only after the previous outcome is known and no step is revisited, so a
//! request costs at most three upstream calls.

use std::sync::Arc;

use log::{debug, warn};

use crate::modules::catalog::{ContentClassifier, GenreCatalog};
use crate::modules::provider::{
    infrastructure::adapters::tmdb::models::TmdbPage, CatalogRepository,
};
use crate::modules::recommendation::domain::entities::{
    RecommendationPage, RecommendationRequest, RecommendationSource,
};
use crate::shared::{
    application::pagination::PageInfo,
    domain::value_objects::CatalogFamily,
    errors::{AppError, AppResult, UpstreamError},
};

#[derive(Debug)]
enum ResolverState {
    PrimaryLocale,
    FallbackLocale,
    SimilarTitles,
    Done(RecommendationSource, TmdbPage),
}

pub struct RecommendationResolver {
    repository: Arc<dyn CatalogRepository>,
    catalog: GenreCatalog,
    fallback_locale: String,
}

impl RecommendationResolver {
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        catalog: GenreCatalog,
        fallback_locale: &str,
    ) -> Self {
        Self {
            repository,
            catalog,
            fallback_locale: fallback_locale.to_string(),
        }
    }

    pub async fn resolve(&self, request: &RecommendationRequest) -> AppResult<RecommendationPage> {
        let taxonomy = self.catalog.get_taxonomy(request.family).await?;

        let mut state = ResolverState::PrimaryLocale;
        let (source, listing) = loop {
            state = match state {
                ResolverState::PrimaryLocale => self.primary_step(request).await?,
                ResolverState::FallbackLocale => self.fallback_step(request).await?,
                ResolverState::SimilarTitles => self.similar_step(request).await?,
                ResolverState::Done(source, listing) => break (source, listing),
            };
        };

        let results =
            ContentClassifier::classify_listing(request.family, &listing.results, &taxonomy);
        debug!(
            "Recommendations for {} {} page {} resolved via {:?}: {} items",
            request.family,
            request.content_id,
            request.page,
            source,
            results.len()
        );

        Ok(RecommendationPage::new(
            PageInfo::new(request.page, listing.total_pages, listing.total_results),
            source,
            results,
        ))
    }

    async fn primary_step(&self, request: &RecommendationRequest) -> AppResult<ResolverState> {
        let outcome = self
            .repository
            .recommendations(request.family, request.content_id, request.page, &request.locale)
            .await;

        match outcome {
            Ok(listing) if listing.is_empty() => Ok(ResolverState::SimilarTitles),
            Ok(listing) => Ok(ResolverState::Done(RecommendationSource::PrimaryLocale, listing)),
            Err(e) if e.is_not_found() || e.is_timeout() => {
                warn!(
                    "TMDB: {} recommendations unavailable in {} for {} ({}), retrying in {}",
                    request.family, request.locale, request.content_id, e, self.fallback_locale
                );
                Ok(ResolverState::FallbackLocale)
            }
            Err(e) => Err(AppError::Upstream(e)),
        }
    }

    async fn fallback_step(&self, request: &RecommendationRequest) -> AppResult<ResolverState> {
        let outcome = self
            .repository
            .recommendations(
                request.family,
                request.content_id,
                request.page,
                &self.fallback_locale,
            )
            .await;

        match outcome {
            Ok(listing) if listing.is_empty() => Ok(ResolverState::SimilarTitles),
            Ok(listing) => Ok(ResolverState::Done(RecommendationSource::FallbackLocale, listing)),
            Err(e) if e.is_not_found() => {
                warn!(
                    "TMDB: {} recommendations not found for {}",
                    request.family, request.content_id
                );
                Ok(ResolverState::Done(
                    RecommendationSource::NotFound,
                    TmdbPage::empty(request.page),
                ))
            }
            Err(e) => Err(wrap_catalog_error(request.family, e)),
        }
    }

    async fn similar_step(&self, request: &RecommendationRequest) -> AppResult<ResolverState> {
        debug!(
            "TMDB: no {} recommendations for {}, using similar titles",
            request.family, request.content_id
        );
        let outcome = self
            .repository
            .similar(request.family, request.content_id, request.page, &request.locale)
            .await;

        match outcome {
            Ok(listing) => Ok(ResolverState::Done(RecommendationSource::SimilarTitles, listing)),
            Err(e) if e.is_not_found() => Ok(ResolverState::Done(
                RecommendationSource::SimilarTitles,
                TmdbPage::empty(request.page),
            )),
            Err(e) => Err(wrap_catalog_error(request.family, e)),
        }
    }
}

fn wrap_catalog_error(family: CatalogFamily, source: UpstreamError) -> AppError {
    let context = match family {
        CatalogFamily::Tv => "TMDB TV API Error",
        CatalogFamily::Movie => "TMDB Movie API Error",
    };
    AppError::wrap(context, source)
}
