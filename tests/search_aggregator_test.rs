mod utils;

use std::sync::Arc;
use std::time::Duration;

use content_hub::modules::provider::infrastructure::adapters::anilist::models::{
    Media, MediaPage, MediaTitle, PageInfo,
};
use content_hub::modules::search::SearchAggregator;
use content_hub::shared::application::pagination::PageRequest;
use content_hub::shared::config::PagingSettings;
use content_hub::{AppError, Bucket, CatalogFamily, GenreCatalog};
use utils::factories::{self, ItemFactory, ACTION, ANIMATION, DOCUMENTARY, DRAMA, SOAP};
use utils::fakes::{not_found, server_error, FakeCatalogRepository, FakeMediaGraphRepository};

const LOCALE: &str = "ko-KR";

fn aggregator(
    repository: Arc<FakeCatalogRepository>,
    graph: Arc<FakeMediaGraphRepository>,
) -> SearchAggregator {
    let catalog = GenreCatalog::new(repository.clone(), LOCALE, Duration::from_secs(3600));
    SearchAggregator::new(repository, graph, catalog, LOCALE, PagingSettings::default())
}

fn comic(id: u64, title: &str) -> Media {
    Media {
        id: Some(id),
        title: Some(MediaTitle {
            user_preferred: Some(title.to_string()),
            ..MediaTitle::default()
        }),
        ..Media::default()
    }
}

fn comic_page(current: u32, last: u32, media: Vec<Media>) -> MediaPage {
    MediaPage {
        page_info: Some(PageInfo {
            current_page: Some(current),
            last_page: Some(last),
            total: Some(media.len() as u32),
            ..PageInfo::default()
        }),
        media: media.into_iter().map(Some).collect(),
    }
}

fn titles(items: &[content_hub::ContentItem]) -> Vec<&str> {
    items.iter().map(|item| item.title.as_str()).collect()
}

#[tokio::test]
async fn test_search_all_buckets_each_family() {
    // Arrange
    let tv = vec![
        ItemFactory::tv(1, "Frieren").genres(&[ANIMATION]).build(),
        ItemFactory::tv(2, "Mr. Sunshine").genres(&[DRAMA]).build(),
        ItemFactory::tv(3, "Blue Planet").genres(&[DOCUMENTARY]).build(),
        ItemFactory::tv(4, "Untagged").build(),
    ];
    let movies = vec![
        ItemFactory::movie(10, "Heat").genres(&[ACTION]).build(),
        ItemFactory::movie(11, "Suzume").genres(&[ANIMATION]).build(),
    ];
    let repository = Arc::new(
        FakeCatalogRepository::new()
            .with_search(CatalogFamily::Tv, Ok(factories::page(1, 1, tv)))
            .with_search(CatalogFamily::Movie, Ok(factories::page(1, 1, movies))),
    );
    let comics = vec![comic(30002, "Berserk"), comic(30656, "Vagabond")];
    let graph =
        Arc::new(FakeMediaGraphRepository::new().with_search(Ok(comic_page(1, 3, comics))));

    // Act
    let response = aggregator(repository, graph.clone())
        .search_all("  frieren ", false)
        .await
        .unwrap();

    // Assert
    assert_eq!(titles(&response.anime), vec!["Frieren", "Suzume"]);
    assert_eq!(titles(&response.drama), vec!["Mr. Sunshine"]);
    assert_eq!(titles(&response.movie), vec!["Heat"]);
    assert_eq!(titles(&response.comics), vec!["Berserk", "Vagabond"]);
    assert!(!response.is_anime_view_more);
    assert!(!response.is_drama_view_more);
    assert!(!response.is_movie_view_more);
    assert!(response.is_comics_view_more);

    let searches = graph.searches.lock().unwrap();
    assert_eq!(searches[0].keyword, "frieren");
    assert_eq!(searches[0].per_page, PagingSettings::default().comics_per_main_page);
}

#[tokio::test]
async fn test_search_all_truncates_buckets_and_flags_overflow() {
    let repository = Arc::new(
        FakeCatalogRepository::new()
            .with_search(CatalogFamily::Tv, Ok(factories::page(1, 1, factories::dramas(1, 8)))),
    );

    let response = aggregator(repository, Arc::new(FakeMediaGraphRepository::new()))
        .search_all("drama", false)
        .await
        .unwrap();

    assert_eq!(response.drama.len(), PagingSettings::default().per_main_page);
    assert!(response.is_drama_view_more);
    assert!(!response.is_movie_view_more);
    assert!(response.comics.is_empty());
    assert!(!response.is_comics_view_more);
}

#[tokio::test]
async fn test_search_all_view_more_follows_upstream_pages() {
    let repository = Arc::new(
        FakeCatalogRepository::new()
            .with_search(CatalogFamily::Tv, Ok(factories::page(1, 3, factories::dramas(1, 2)))),
    );

    let response = aggregator(repository, Arc::new(FakeMediaGraphRepository::new()))
        .search_all("drama", false)
        .await
        .unwrap();

    assert!(response.is_anime_view_more);
    assert!(response.is_drama_view_more);
    assert!(!response.is_movie_view_more);
}

#[tokio::test]
async fn test_search_all_treats_not_found_as_empty() {
    let repository = Arc::new(
        FakeCatalogRepository::new()
            .with_search(CatalogFamily::Tv, Err(not_found("/search/tv")))
            .with_search(CatalogFamily::Movie, Err(not_found("/search/movie"))),
    );

    let response = aggregator(repository, Arc::new(FakeMediaGraphRepository::new()))
        .search_all("nothing", true)
        .await
        .unwrap();

    assert!(response.anime.is_empty());
    assert!(response.drama.is_empty());
    assert!(response.movie.is_empty());
}

#[tokio::test]
async fn test_search_all_propagates_server_errors() {
    let repository = Arc::new(
        FakeCatalogRepository::new().with_search(CatalogFamily::Movie, Err(server_error())),
    );

    let err = aggregator(repository, Arc::new(FakeMediaGraphRepository::new()))
        .search_all("heat", false)
        .await
        .unwrap_err();

    assert_eq!(err.upstream(), Some(&server_error()));
}

#[tokio::test]
async fn test_blank_keyword_is_rejected_without_upstream_calls() {
    let repository = Arc::new(FakeCatalogRepository::new());

    let err = aggregator(repository.clone(), Arc::new(FakeMediaGraphRepository::new()))
        .search_all("   ", false)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_)));
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_anime_bucket_merges_tv_and_movie_pages() {
    // Arrange
    let tv = vec![
        ItemFactory::tv(1, "Naruto").genres(&[ANIMATION]).build(),
        ItemFactory::tv(2, "Naruto Live").genres(&[DRAMA]).build(),
    ];
    let movies = vec![
        ItemFactory::movie(3, "The Last").genres(&[ANIMATION, ACTION]).build(),
        ItemFactory::movie(4, "Ninja Assassin").genres(&[ACTION]).build(),
    ];
    let repository = Arc::new(
        FakeCatalogRepository::new()
            .with_search(CatalogFamily::Tv, Ok(factories::page(2, 5, tv)))
            .with_search(CatalogFamily::Movie, Ok(factories::page(2, 3, movies))),
    );

    // Act
    let page = aggregator(repository.clone(), Arc::new(FakeMediaGraphRepository::new()))
        .search_bucket(Bucket::Anime, "naruto", PageRequest::new(Some(2)), false)
        .await
        .unwrap();

    // Assert
    assert_eq!(page.bucket, Bucket::Anime);
    assert_eq!(titles(&page.results), vec!["Naruto", "The Last"]);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.total_results, 4);
    assert!(page.has_more);
    assert!(repository.calls().contains(&"search:tv:ko-KR:naruto:2".to_string()));
}

#[tokio::test]
async fn test_drama_bucket_excludes_anime() {
    let tv = vec![
        ItemFactory::tv(1, "Naruto").genres(&[ANIMATION]).build(),
        ItemFactory::tv(2, "Goblin").genres(&[DRAMA]).build(),
    ];
    let repository = Arc::new(
        FakeCatalogRepository::new().with_search(CatalogFamily::Tv, Ok(factories::page(1, 1, tv))),
    );

    let page = aggregator(repository.clone(), Arc::new(FakeMediaGraphRepository::new()))
        .search_bucket(Bucket::Drama, "goblin", PageRequest::default(), false)
        .await
        .unwrap();

    assert_eq!(titles(&page.results), vec!["Goblin"]);
    assert!(!page.has_more);
    assert_eq!(repository.count("search"), 1);
}

#[tokio::test]
async fn test_comic_bucket_uses_view_more_page_size() {
    let comics = vec![comic(1, "Monster")];
    let graph =
        Arc::new(FakeMediaGraphRepository::new().with_search(Ok(comic_page(2, 2, comics))));

    let page = aggregator(Arc::new(FakeCatalogRepository::new()), graph.clone())
        .search_bucket(Bucket::Comic, "monster", PageRequest::new(Some(2)), true)
        .await
        .unwrap();

    assert_eq!(titles(&page.results), vec!["Monster"]);
    assert_eq!(page.page, 2);
    assert!(!page.has_more);
    let searches = graph.searches.lock().unwrap();
    assert_eq!(searches[0].page, 2);
    assert_eq!(searches[0].per_page, PagingSettings::default().comics_per_more_page);
    assert!(searches[0].include_adult);
}

#[tokio::test]
async fn test_suggestions_put_prefix_matches_first() {
    // Arrange
    let multi = vec![
        ItemFactory::tv(1, "Naruto Shippuden").genres(&[ANIMATION]).build(),
        ItemFactory::tv(2, "Boruto: Naruto Next Generations").genres(&[ANIMATION]).build(),
        ItemFactory::tv(3, "Naruto Shippuden").genres(&[ANIMATION]).build(),
        ItemFactory::tv(4, "naruto daily").genres(&[SOAP]).build(),
        ItemFactory::tv(5, "Naruto Documentary").genres(&[DOCUMENTARY]).build(),
        ItemFactory::movie(6, "The Last: Naruto the Movie").genres(&[ANIMATION]).build(),
        ItemFactory::movie(7, "Naruto Untagged").build(),
        ItemFactory::person(8, "Naruto Uzumaki").genres(&[ANIMATION]).build(),
    ];
    let repository = Arc::new(
        FakeCatalogRepository::new().with_multi_search(Ok(factories::page(1, 1, multi))),
    );

    // Act
    let suggestions = aggregator(repository, Arc::new(FakeMediaGraphRepository::new()))
        .suggest_keywords("Naruto", false)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        suggestions,
        vec![
            "Naruto Shippuden",
            "naruto daily",
            "Boruto: Naruto Next Generations",
            "The Last: Naruto the Movie",
        ]
    );
}

#[tokio::test]
async fn test_suggestions_are_capped() {
    let multi = (0..20)
        .map(|n| ItemFactory::movie(n, &format!("Movie {:02}", n)).genres(&[ACTION]).build())
        .collect();
    let repository = Arc::new(
        FakeCatalogRepository::new().with_multi_search(Ok(factories::page(1, 1, multi))),
    );

    let suggestions = aggregator(repository, Arc::new(FakeMediaGraphRepository::new()))
        .suggest_keywords("movie", false)
        .await
        .unwrap();

    assert_eq!(suggestions.len(), PagingSettings::default().autocomplete_count);
    assert_eq!(suggestions[0], "Movie 00");
}

#[tokio::test]
async fn test_search_all_fetches_taxonomy_alongside_searches() {
    // Arrange
    let repository = Arc::new(
        FakeCatalogRepository::new().with_genres(CatalogFamily::Tv, Err(server_error())),
    );
    let graph = Arc::new(FakeMediaGraphRepository::new());

    // Act
    let err = aggregator(repository.clone(), graph.clone())
        .search_all("frieren", false)
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err, AppError::TaxonomyUnavailable { .. }));
    assert_eq!(repository.count("search"), 2);
    assert_eq!(graph.searches.lock().unwrap().len(), 1);
}
