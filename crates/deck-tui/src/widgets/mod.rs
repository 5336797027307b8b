//! Custom widget components

mod capsule;
mod error_screen;
mod loading_overlay;
pub mod modal_overlay;
mod notice;
mod page_view;

pub use capsule::Capsule;
pub use error_screen::ErrorScreen;
pub use loading_overlay::LoadingOverlay;
pub use notice::NoticeDialog;
pub use page_view::PageView;
