//! Core types: Zettel, ZettelId, TagIndex and the content parser

mod tag_index;
mod zettel;
mod zettel_id;

pub use tag_index::TagIndex;
pub use zettel::{ParseZettelError, ParsedContent, Zettel, parse_content, parse_tags, parse_title};
pub use zettel_id::{ID_FORMAT, ID_LEN, PRETTY_FORMAT, ParseZettelIdError, ZettelId};
