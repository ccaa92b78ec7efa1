//! Theme selection
//!
//! Only the identity of the selected theme lives here; colours, fonts and spacing belong to
//! the rendering layer.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Unknown theme identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

/// Page arrangement used by a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Top navigation, centred content
    Default,

    /// Fixed navigation sidebar
    Sidebar,

    /// Card grid
    Grid,
}

/// One of the storefront's interchangeable themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    /// `theme1`
    #[default]
    Minimalist,

    /// `theme2`
    DarkSidebar,

    /// `theme3`
    ColorfulCards,
}

impl ThemeId {
    /// Every theme, in menu order.
    pub const ALL: [ThemeId; 3] = [Self::Minimalist, Self::DarkSidebar, Self::ColorfulCards];

    /// Stored identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimalist => "theme1",
            Self::DarkSidebar => "theme2",
            Self::ColorfulCards => "theme3",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Minimalist => "Theme 1 - Minimalist",
            Self::DarkSidebar => "Theme 2 - Dark Sidebar",
            Self::ColorfulCards => "Theme 3 - Colorful Cards",
        }
    }

    /// Layout the theme renders with.
    pub fn layout(self) -> Layout {
        match self {
            Self::Minimalist => Layout::Default,
            Self::DarkSidebar => Layout::Sidebar,
            Self::ColorfulCards => Layout::Grid,
        }
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
