pub mod comic_detail;
pub mod media_detail;
pub mod person_detail;

pub use comic_detail::{CharacterDetail, ComicCharacter, ComicDetail};
pub use media_detail::{CastMember, MovieDetail, TvDetail};
pub use person_detail::{Gender, PersonCredit, PersonDetail};
