//! UI Components

pub mod loading_screen;
pub mod social_links;

pub use loading_screen::LoadingScreen;
pub use social_links::SocialLinksRow;
