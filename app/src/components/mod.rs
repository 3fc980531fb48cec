//! Page sections and page-level widgets.

pub mod about;
pub mod contact;
pub mod cursor;
pub mod hero;
pub mod preloader;
pub mod projects;
pub mod scroll_progress;
pub mod theme_toggle;

pub use about::About;
pub use contact::Contact;
pub use cursor::Cursor;
pub use hero::Hero;
pub use preloader::LoadingScreen;
pub use projects::Projects;
pub use scroll_progress::ScrollProgress;
pub use theme_toggle::ThemeToggle;
