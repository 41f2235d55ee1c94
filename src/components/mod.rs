//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod icons;
mod media_bridge;
mod navigation;
mod player;
mod sidebar;
mod song_actions;
mod toast;
mod track_list;
mod views;

pub use app::*;
pub use app_view::*;
pub use icons::*;
pub use media_bridge::{toggle_fullscreen, MediaBridge, PlayerHandle};
pub use navigation::*;
pub use player::*;
pub use sidebar::*;
pub use song_actions::*;
pub use toast::*;
pub use track_list::*;
// Views are accessed via views::ViewName
