//! Page-level state that is independent of any rendering technology.

pub mod menu;
pub mod section;
pub mod theme;
pub mod typewriter;

pub use menu::MenuState;
pub use section::Section;
pub use theme::Theme;
pub use typewriter::Typewriter;
