//! Mobile navigation menu open/closed state.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

impl MenuState {
    /// Query value that requests the open menu.
    pub const OPEN_QUERY: &'static str = "open";

    /// Read the state from the `menu` query parameter.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(Self::OPEN_QUERY) => Self::Open,
            _ => Self::Closed,
        }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Link target for the menu button; following it flips the state.
    #[must_use]
    pub fn toggle_href(self) -> String {
        match self.toggled() {
            Self::Open => format!("/?menu={}", Self::OPEN_QUERY),
            Self::Closed => "/".to_string(),
        }
    }
}
