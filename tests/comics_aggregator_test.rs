mod utils;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::{mock, predicate::*};

use content_hub::modules::comics::ComicsAggregator;
use content_hub::modules::provider::infrastructure::adapters::anilist::models::{
    Character, Media, MediaPage, MediaRelationConnection, PageInfo, RecommendationConnection,
    RecommendationNode,
};
use content_hub::modules::provider::{ComicQuery, ComicSearch, MediaGraphRepository};
use content_hub::shared::application::pagination::PageRequest;
use content_hub::{AppError, Bucket, Provider, UpstreamError, UpstreamResult};
use utils::factories::{anime_ref, manga_ref};

mock! {
    pub Graph {}

    #[async_trait]
    impl MediaGraphRepository for Graph {
        async fn comic_detail(&self, query: ComicQuery) -> UpstreamResult<Media>;
        async fn comic_recommendations(&self, query: ComicQuery) -> UpstreamResult<Media>;
        async fn comic_search(&self, search: ComicSearch) -> UpstreamResult<MediaPage>;
        async fn character_detail(&self, character_id: u64) -> UpstreamResult<Character>;
    }
}

const PER_PAGE: u32 = 15;

fn comic_media(current_page: u32, last_page: u32) -> Media {
    Media {
        id: Some(30002),
        relations: Some(MediaRelationConnection {
            nodes: vec![
                Some(manga_ref(1, "Berserk: Prototype")),
                Some(anime_ref(2, "Berserk (1997)")),
                None,
            ],
        }),
        recommendations: Some(RecommendationConnection {
            page_info: Some(PageInfo {
                current_page: Some(current_page),
                last_page: Some(last_page),
                ..PageInfo::default()
            }),
            nodes: vec![
                Some(RecommendationNode {
                    media_recommendation: Some(manga_ref(10, "Vagabond")),
                }),
                Some(RecommendationNode {
                    media_recommendation: Some(anime_ref(11, "Claymore")),
                }),
                Some(RecommendationNode {
                    media_recommendation: None,
                }),
                Some(RecommendationNode {
                    media_recommendation: Some(manga_ref(12, "Vinland Saga")),
                }),
            ],
        }),
        ..Media::default()
    }
}

#[tokio::test]
async fn test_first_page_places_related_before_recommended() {
    // Arrange
    let mut graph = MockGraph::new();
    graph
        .expect_comic_recommendations()
        .with(eq(ComicQuery::new(30002, 1, PER_PAGE, false)))
        .times(1)
        .returning(|_| Ok(comic_media(1, 3)));
    let aggregator = ComicsAggregator::new(Arc::new(graph), PER_PAGE);

    // Act
    let recommendations = aggregator
        .resolve(30002, PageRequest::new(Some(1)), false)
        .await
        .unwrap();

    // Assert
    let titles: Vec<&str> = recommendations
        .results
        .iter()
        .map(|item| item.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Berserk: Prototype", "Vagabond", "Vinland Saga"]);
    assert_eq!(recommendations.related_titles.len(), 1);
    assert_eq!(recommendations.recommended_titles.len(), 2);
    assert!(recommendations.results.iter().all(|item| item.bucket == Bucket::Comic));
    assert!(recommendations.has_more);
}

#[tokio::test]
async fn test_later_pages_carry_recommendations_only() {
    let mut graph = MockGraph::new();
    graph
        .expect_comic_recommendations()
        .with(eq(ComicQuery::new(30002, 3, PER_PAGE, false)))
        .times(1)
        .returning(|_| Ok(comic_media(3, 3)));
    let aggregator = ComicsAggregator::new(Arc::new(graph), PER_PAGE);

    let recommendations = aggregator
        .resolve(30002, PageRequest::new(Some(3)), false)
        .await
        .unwrap();

    assert!(recommendations.related_titles.is_empty());
    assert_eq!(recommendations.results.len(), 2);
    assert_eq!(recommendations.page, 3);
    assert!(!recommendations.has_more);
}

#[tokio::test]
async fn test_adult_filter_is_sent_only_when_adult_content_is_excluded() {
    // Arrange
    let mut graph = MockGraph::new();
    graph
        .expect_comic_recommendations()
        .withf(|query| query.include_adult)
        .times(1)
        .returning(|query| {
            assert!(query.variables().get("isAdult").is_none());
            Ok(Media::default())
        });
    graph
        .expect_comic_recommendations()
        .withf(|query| !query.include_adult)
        .times(1)
        .returning(|query| {
            assert_eq!(query.variables()["isAdult"], false);
            Ok(Media::default())
        });
    let aggregator = ComicsAggregator::new(Arc::new(graph), PER_PAGE);

    // Act
    let with_adult = aggregator.resolve(1, PageRequest::default(), true).await;
    let without_adult = aggregator.resolve(1, PageRequest::default(), false).await;

    // Assert
    assert!(with_adult.unwrap().results.is_empty());
    assert!(without_adult.unwrap().results.is_empty());
}

#[tokio::test]
async fn test_unknown_comic_yields_empty_recommendations() {
    let mut graph = MockGraph::new();
    graph
        .expect_comic_recommendations()
        .returning(|query| {
            Err(UpstreamError::not_found(
                Provider::AniList,
                format!("Media {}", query.media_id),
            ))
        });
    let aggregator = ComicsAggregator::new(Arc::new(graph), PER_PAGE);

    let recommendations = aggregator
        .resolve(999_999, PageRequest::new(Some(2)), false)
        .await
        .unwrap();

    assert!(recommendations.results.is_empty());
    assert_eq!(recommendations.page, 2);
    assert!(!recommendations.has_more);
}

#[tokio::test]
async fn test_upstream_failure_is_wrapped() {
    let mut graph = MockGraph::new();
    graph.expect_comic_recommendations().returning(|_| {
        Err(UpstreamError::GraphQl {
            provider: Provider::AniList,
            message: "Internal Server Error".to_string(),
        })
    });
    let aggregator = ComicsAggregator::new(Arc::new(graph), PER_PAGE);

    let err = aggregator
        .resolve(1, PageRequest::default(), false)
        .await
        .unwrap_err();

    match err {
        AppError::UpstreamFailure { context, .. } => assert_eq!(context, "AniList API Error"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_has_more_uses_next_page_flag_when_last_page_is_unknown() {
    let mut graph = MockGraph::new();
    graph.expect_comic_recommendations().returning(|_| {
        Ok(Media {
            recommendations: Some(RecommendationConnection {
                page_info: Some(PageInfo {
                    has_next_page: Some(true),
                    ..PageInfo::default()
                }),
                nodes: vec![Some(RecommendationNode {
                    media_recommendation: Some(manga_ref(5, "Monster")),
                })],
            }),
            ..Media::default()
        })
    });
    let aggregator = ComicsAggregator::new(Arc::new(graph), PER_PAGE);

    let recommendations = aggregator
        .resolve(1, PageRequest::default(), false)
        .await
        .unwrap();

    assert!(recommendations.has_more);
    assert_eq!(recommendations.results[0].poster_path, "https://img/5/xl.jpg");
}
