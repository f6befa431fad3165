use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::modules::catalog::domain::entities::content_item::parse_date;
use crate::modules::provider::infrastructure::adapters::tmdb::models::{
    TmdbPersonCredit, TmdbPersonCredits, TmdbPersonDetail,
};
use crate::shared::domain::value_objects::CatalogFamily;

/// TMDB gender codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    NotSpecified,
    Female,
    Male,
    NonBinary,
}

impl Gender {
    pub fn from_code(code: Option<u8>) -> Self {
        match code {
            Some(1) => Gender::Female,
            Some(2) => Gender::Male,
            Some(3) => Gender::NonBinary,
            _ => Gender::NotSpecified,
        }
    }
}

/// One cast or crew credit from either family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCredit {
    pub id: u64,
    pub credit_id: Option<String>,
    pub media_type: CatalogFamily,
    pub title: String,
    pub original_title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub release_year: Option<i32>,
    /// TV credits only
    pub episode_count: Option<u32>,
    pub character: Option<String>,
    pub job: Option<String>,
    pub department: Option<String>,
    pub poster_path: String,
}

impl PersonCredit {
    fn from_tmdb(credit: &TmdbPersonCredit, family: CatalogFamily) -> Self {
        let (title, original_title, release_date, episode_count) = match family {
            CatalogFamily::Tv => (
                credit.name.clone(),
                credit.original_name.clone(),
                credit.first_credit_air_date.as_deref(),
                credit.episode_count,
            ),
            CatalogFamily::Movie => (
                credit.title.clone(),
                credit.original_title.clone(),
                credit.release_date.as_deref(),
                None,
            ),
        };
        let release_date = release_date.and_then(parse_date);

        Self {
            id: credit.id,
            credit_id: credit.credit_id.clone(),
            media_type: family,
            title: title.unwrap_or_default(),
            original_title,
            release_date,
            release_year: release_date.map(|date| date.year()),
            episode_count,
            character: credit.character.clone().filter(|c| !c.is_empty()),
            job: credit.job.clone(),
            department: credit.department.clone(),
            poster_path: credit.poster_path.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetail {
    pub id: u64,
    pub name: String,
    pub also_known_as: Vec<String>,
    pub biography: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub deathday: Option<NaiveDate>,
    pub gender: Gender,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub known_for_department: Option<String>,
    pub place_of_birth: Option<String>,
    pub popularity: Option<f64>,
    pub profile_path: String,
    pub adult: bool,
    /// Distinct titles among `cast`
    pub cast_count: usize,
    /// Distinct titles among `crew`
    pub crew_count: usize,
    pub cast: Vec<PersonCredit>,
    pub crew: Vec<PersonCredit>,
}

impl PersonDetail {
    pub fn from_tmdb(detail: TmdbPersonDetail) -> Self {
        let tv = detail.tv_credits.as_ref();
        let movie = detail.movie_credits.as_ref();

        let cast = merge_credits(tv, movie, |credits| &credits.cast);
        let crew = merge_credits(tv, movie, |credits| &credits.crew);

        Self {
            id: detail.id,
            name: detail.name.unwrap_or_default(),
            also_known_as: detail.also_known_as,
            biography: detail.biography.filter(|b| !b.is_empty()),
            birthday: detail.birthday.as_deref().and_then(parse_date),
            deathday: detail.deathday.as_deref().and_then(parse_date),
            gender: Gender::from_code(detail.gender),
            homepage: detail.homepage.filter(|h| !h.is_empty()),
            imdb_id: detail.imdb_id,
            known_for_department: detail.known_for_department,
            place_of_birth: detail.place_of_birth,
            popularity: detail.popularity,
            profile_path: detail.profile_path.unwrap_or_default(),
            adult: detail.adult.unwrap_or(false),
            cast_count: distinct_titles(&cast),
            crew_count: distinct_titles(&crew),
            cast,
            crew,
        }
    }
}

/// TV rows first, then movie rows, then newest year first; undated rows sink
fn merge_credits<F>(
    tv: Option<&TmdbPersonCredits>,
    movie: Option<&TmdbPersonCredits>,
    pick: F,
) -> Vec<PersonCredit>
where
    F: Fn(&TmdbPersonCredits) -> &Vec<TmdbPersonCredit>,
{
    let mut merged: Vec<PersonCredit> = [(tv, CatalogFamily::Tv), (movie, CatalogFamily::Movie)]
        .into_iter()
        .filter_map(|(credits, family)| credits.map(|c| (c, family)))
        .flat_map(|(credits, family)| {
            pick(credits)
                .iter()
                .map(move |credit| PersonCredit::from_tmdb(credit, family))
        })
        .collect();

    merged.sort_by(|a, b| b.release_year.cmp(&a.release_year));
    merged
}

fn distinct_titles(credits: &[PersonCredit]) -> usize {
    credits
        .iter()
        .filter(|credit| !credit.title.is_empty())
        .map(|credit| credit.title.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_credit(id: u64, title: &str, date: &str) -> TmdbPersonCredit {
        TmdbPersonCredit {
            id,
            title: Some(title.into()),
            release_date: Some(date.into()),
            ..TmdbPersonCredit::default()
        }
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code(Some(1)), Gender::Female);
        assert_eq!(Gender::from_code(Some(2)), Gender::Male);
        assert_eq!(Gender::from_code(Some(3)), Gender::NonBinary);
        assert_eq!(Gender::from_code(Some(0)), Gender::NotSpecified);
        assert_eq!(Gender::from_code(None), Gender::NotSpecified);
    }

    #[test]
    fn test_credits_merge_newest_first() {
        let detail = TmdbPersonDetail {
            id: 17419,
            name: Some("Song Kang-ho".into()),
            gender: Some(2),
            tv_credits: Some(TmdbPersonCredits {
                cast: vec![TmdbPersonCredit {
                    id: 1,
                    name: Some("Uncle".into()),
                    first_credit_air_date: Some("2021-05-01".into()),
                    episode_count: Some(16),
                    ..TmdbPersonCredit::default()
                }],
                crew: Vec::new(),
            }),
            movie_credits: Some(TmdbPersonCredits {
                cast: vec![
                    movie_credit(2, "Memories of Murder", "2003-05-02"),
                    movie_credit(3, "Parasite", "2019-05-30"),
                    movie_credit(4, "Parasite", ""),
                ],
                crew: vec![TmdbPersonCredit {
                    job: Some("Producer".into()),
                    ..movie_credit(5, "Cobweb", "2023-09-27")
                }],
            }),
            ..TmdbPersonDetail::default()
        };

        let person = PersonDetail::from_tmdb(detail);

        let ids: Vec<u64> = person.cast.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
        assert_eq!(person.cast[0].media_type, CatalogFamily::Tv);
        assert_eq!(person.cast[0].episode_count, Some(16));
        assert_eq!(person.cast[3].release_year, None);
        assert_eq!(person.cast_count, 3);
        assert_eq!(person.crew_count, 1);
        assert_eq!(person.crew[0].job.as_deref(), Some("Producer"));
        assert_eq!(person.gender, Gender::Male);
    }

    #[test]
    fn test_person_without_credits() {
        let person = PersonDetail::from_tmdb(TmdbPersonDetail {
            id: 9,
            ..TmdbPersonDetail::default()
        });

        assert!(person.cast.is_empty());
        assert!(person.crew.is_empty());
        assert_eq!(person.cast_count, 0);
        assert_eq!(person.name, "");
        assert_eq!(person.gender, Gender::NotSpecified);
    }
}
