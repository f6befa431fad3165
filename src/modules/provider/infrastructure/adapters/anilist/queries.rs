//! AniList GraphQL queries
//!
//! Every comic query takes an optional `$isAdult`; leaving it unset lets the
//! upstream return adult entries, setting it to `false` filters them out.

/// Comic detail with a page of characters
pub const COMIC_DETAIL_QUERY: &str = r#"
query ($mediaId: Int, $page: Int, $perPage: Int, $isAdult: Boolean) {
  Media(id: $mediaId, type: MANGA, isAdult: $isAdult) {
    id
    type
    title {
      romaji
      english
      native
      userPreferred
    }
    description(asHtml: false)
    genres
    isAdult
    status
    volumes
    chapters
    siteUrl
    averageScore
    popularity
    coverImage {
      extraLarge
      large
      medium
      color
    }
    startDate {
      year
      month
      day
    }
    characters(page: $page, perPage: $perPage, sort: [ROLE, RELEVANCE, ID]) {
      pageInfo {
        total
        perPage
        currentPage
        lastPage
        hasNextPage
      }
      nodes {
        id
        siteUrl
        name {
          full
          native
          userPreferred
        }
        image {
          large
          medium
        }
      }
    }
  }
}
"#;

/// Relations plus a page of community recommendations for one comic
pub const COMIC_RECOMMENDATIONS_QUERY: &str = r#"
query ($mediaId: Int, $page: Int, $perPage: Int, $isAdult: Boolean) {
  Media(id: $mediaId, type: MANGA, isAdult: $isAdult) {
    id
    type
    relations {
      nodes {
        id
        type
        title {
          userPreferred
        }
        coverImage {
          extraLarge
          large
        }
      }
    }
    recommendations(page: $page, perPage: $perPage, sort: [RATING_DESC, ID]) {
      pageInfo {
        total
        perPage
        currentPage
        lastPage
        hasNextPage
      }
      nodes {
        mediaRecommendation {
          id
          type
          title {
            userPreferred
          }
          coverImage {
            extraLarge
            large
          }
        }
      }
    }
  }
}
"#;

/// Paged comic search
pub const COMIC_SEARCH_QUERY: &str = r#"
query ($search: String, $page: Int, $perPage: Int, $isAdult: Boolean) {
  Page(page: $page, perPage: $perPage) {
    pageInfo {
      total
      perPage
      currentPage
      lastPage
      hasNextPage
    }
    media(search: $search, type: MANGA, isAdult: $isAdult, sort: [SEARCH_MATCH, POPULARITY_DESC]) {
      id
      type
      title {
        userPreferred
      }
      genres
      isAdult
      popularity
      averageScore
      coverImage {
        extraLarge
        large
      }
      startDate {
        year
        month
        day
      }
    }
  }
}
"#;

pub const CHARACTER_DETAIL_QUERY: &str = r#"
query ($characterId: Int) {
  Character(id: $characterId) {
    id
    siteUrl
    image {
      large
      medium
    }
    name {
      first
      last
      full
      native
      userPreferred
      alternative
    }
    age
    gender
    description(asHtml: false)
  }
}
"#;
