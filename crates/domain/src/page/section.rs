//! The sections that make up the single page, in page order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Home,
    About,
    Experience,
    Projects,
    Skills,
    Education,
    Contact,
}

impl Section {
    /// Every section in the order it appears on the page.
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::About,
        Self::Experience,
        Self::Projects,
        Self::Skills,
        Self::Education,
        Self::Contact,
    ];

    /// Links in the top navigation bar. Education is reachable from the footer only.
    pub const NAVBAR: [Self; 6] = [
        Self::Home,
        Self::About,
        Self::Experience,
        Self::Projects,
        Self::Skills,
        Self::Contact,
    ];

    /// Footer "Quick Links" column.
    pub const FOOTER_QUICK: [Self; 4] = [Self::Home, Self::About, Self::Experience, Self::Projects];

    /// Footer "More" column.
    pub const FOOTER_MORE: [Self; 3] = [Self::Skills, Self::Education, Self::Contact];

    /// Element id of the section, used as the URL fragment.
    #[must_use]
    pub fn anchor(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Education => "education",
            Self::Contact => "contact",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Education => "Education",
            Self::Contact => "Contact",
        }
    }

    /// Same-page link to the section.
    #[must_use]
    pub fn href(self) -> String {
        format!("/#{}", self.anchor())
    }
}
