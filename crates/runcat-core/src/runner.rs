use serde::{Deserialize, Serialize};

/// Static description of an animated character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerInfo {
    /// Display and file-name stem (e.g. `cat` for `cat_0.ico`).
    pub name: &'static str,
    /// Number of frames in one animation cycle.
    pub frames: usize,
}

/// Frame table, indexed by [`Runner`] discriminant.
const RUNNERS: [RunnerInfo; 2] = [
    RunnerInfo {
        name: "cat",
        frames: 5,
    },
    RunnerInfo {
        name: "parrot",
        frames: 10,
    },
];

/// The animated character shown in the tray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runner {
    #[default]
    Cat,
    Parrot,
}

impl Runner {
    /// Every runner, in menu order.
    pub const ALL: [Runner; 2] = [Runner::Cat, Runner::Parrot];

    pub fn info(self) -> RunnerInfo {
        RUNNERS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Number of frames in one cycle. Always at least 1.
    pub fn frame_count(self) -> usize {
        self.info().frames.max(1)
    }

    /// Menu label with the first letter capitalised.
    pub fn label(self) -> String {
        let mut chars = self.name().chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Parses a runner name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Tray theme choice. Shown in the menu but not yet selectable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Dark, Theme::Light];

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Whether switching themes has any effect. No theming backend
    /// exists, so the menu shows the choices disabled.
    pub fn is_supported() -> bool {
        false
    }
}
