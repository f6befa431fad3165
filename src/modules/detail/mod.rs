pub mod application;
pub mod domain;

pub use application::DetailService;
pub use domain::entities::{
    CastMember, CharacterDetail, ComicCharacter, ComicDetail, Gender, MovieDetail, PersonCredit,
    PersonDetail, TvDetail,
};
