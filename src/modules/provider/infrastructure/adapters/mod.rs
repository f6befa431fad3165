pub mod anilist;
pub mod tmdb;

pub use anilist::AniListAdapter;
pub use tmdb::TmdbAdapter;
