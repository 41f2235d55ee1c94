//! Favorites and playlists for the signed-in user.

mod notice;
mod remote;
mod service;

pub use notice::{MutationError, Notice, NoticeLevel, NOTICE_TTL};
pub use service::{LibraryService, LibrarySnapshot};
