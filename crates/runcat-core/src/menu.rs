//! Platform-agnostic model of the tray context menu.
//!
//! The host rebuilds the native popup from [`layout`] every time it is
//! opened and maps the chosen command id back through
//! [`MenuCommand::from_id`].

use crate::runner::{Runner, Theme};

const RUNNER_BASE_ID: u32 = 100;
const THEME_BASE_ID: u32 = 200;
const STARTUP_ID: u32 = 300;
const EXIT_ID: u32 = 301;

/// A command chosen from the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    SelectRunner(Runner),
    SelectTheme(Theme),
    ToggleStartup,
    Exit,
}

impl MenuCommand {
    /// Stable numeric id used as the native menu item identifier.
    /// Never 0, which popup menus reserve for "dismissed".
    pub fn id(self) -> u32 {
        match self {
            Self::SelectRunner(r) => RUNNER_BASE_ID + r as u32,
            Self::SelectTheme(t) => THEME_BASE_ID + t as u32,
            Self::ToggleStartup => STARTUP_ID,
            Self::Exit => EXIT_ID,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            STARTUP_ID => Some(Self::ToggleStartup),
            EXIT_ID => Some(Self::Exit),
            _ => Runner::ALL
                .into_iter()
                .map(Self::SelectRunner)
                .chain(Theme::ALL.into_iter().map(Self::SelectTheme))
                .find(|cmd| cmd.id() == id),
        }
    }
}

/// Snapshot of everything the menu displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub runner: Runner,
    pub theme: Theme,
    pub startup: bool,
}

/// One entry of the popup menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: String,
        command: MenuCommand,
        checked: bool,
        enabled: bool,
        /// Member of a mutually exclusive group, drawn with a radio mark.
        radio: bool,
    },
    Submenu {
        label: String,
        entries: Vec<MenuEntry>,
        enabled: bool,
    },
    Separator,
}

/// Describes the popup menu for the given state.
pub fn layout(state: &MenuState) -> Vec<MenuEntry> {
    let runners = Runner::ALL
        .into_iter()
        .map(|r| MenuEntry::Item {
            label: r.label(),
            command: MenuCommand::SelectRunner(r),
            checked: r == state.runner,
            enabled: true,
            radio: true,
        })
        .collect();
    let themes = Theme::ALL
        .into_iter()
        .map(|t| MenuEntry::Item {
            label: t.label().into(),
            command: MenuCommand::SelectTheme(t),
            checked: t == state.theme,
            enabled: Theme::is_supported(),
            radio: true,
        })
        .collect();

    vec![
        MenuEntry::Submenu {
            label: "Runner".into(),
            entries: runners,
            enabled: true,
        },
        MenuEntry::Submenu {
            label: "Theme".into(),
            entries: themes,
            enabled: Theme::is_supported(),
        },
        MenuEntry::Item {
            label: "Startup".into(),
            command: MenuCommand::ToggleStartup,
            checked: state.startup,
            enabled: true,
            radio: false,
        },
        MenuEntry::Separator,
        MenuEntry::Item {
            label: "Exit".into(),
            command: MenuCommand::Exit,
            checked: false,
            enabled: true,
            radio: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_commands() -> Vec<MenuCommand> {
        let mut commands: Vec<_> = Runner::ALL.map(MenuCommand::SelectRunner).to_vec();
        commands.extend(Theme::ALL.map(MenuCommand::SelectTheme));
        commands.push(MenuCommand::ToggleStartup);
        commands.push(MenuCommand::Exit);
        commands
    }

    #[test]
    fn command_ids_are_unique_and_round_trip() {
        let commands = all_commands();
        for cmd in &commands {
            assert_ne!(cmd.id(), 0);
            assert_eq!(MenuCommand::from_id(cmd.id()), Some(*cmd));
            assert_eq!(commands.iter().filter(|c| c.id() == cmd.id()).count(), 1);
        }
    }

    #[test]
    fn unknown_id_is_ignored() {
        assert_eq!(MenuCommand::from_id(0), None);
        assert_eq!(MenuCommand::from_id(9999), None);
    }

    #[test]
    fn selected_runner_is_the_only_checked_one() {
        // Arrange
        let state = MenuState {
            runner: Runner::Parrot,
            ..Default::default()
        };

        // Act
        let entries = layout(&state);

        // Assert
        let MenuEntry::Submenu { entries: runners, .. } = &entries[0] else {
            panic!("first entry should be the runner submenu");
        };
        let checked: Vec<_> = runners
            .iter()
            .filter_map(|e| match e {
                MenuEntry::Item {
                    command, checked: true, ..
                } => Some(*command),
                _ => None,
            })
            .collect();
        assert_eq!(checked, vec![MenuCommand::SelectRunner(Runner::Parrot)]);
    }

    #[test]
    fn theme_submenu_is_disabled() {
        let entries = layout(&MenuState::default());
        assert!(matches!(
            &entries[1],
            MenuEntry::Submenu { enabled: false, label, .. } if label == "Theme"
        ));
    }

    #[test]
    fn startup_item_reflects_state() {
        // Arrange
        let state = MenuState {
            startup: true,
            ..Default::default()
        };

        // Act
        let entries = layout(&state);

        // Assert
        assert!(entries.contains(&MenuEntry::Item {
            label: "Startup".into(),
            command: MenuCommand::ToggleStartup,
            checked: true,
            enabled: true,
            radio: false,
        }));
        assert_eq!(
            entries.last(),
            Some(&MenuEntry::Item {
                label: "Exit".into(),
                command: MenuCommand::Exit,
                checked: false,
                enabled: true,
                radio: false,
            })
        );
    }

    #[test]
    fn runner_items_form_a_radio_group() {
        // Arrange / Act
        let entries = layout(&MenuState::default());

        // Assert
        let MenuEntry::Submenu { entries: runners, .. } = &entries[0] else {
            panic!("first entry should be the runner submenu");
        };
        assert!(
            runners
                .iter()
                .all(|e| matches!(e, MenuEntry::Item { radio: true, .. }))
        );
        assert!(entries.iter().any(|e| matches!(
            e,
            MenuEntry::Item {
                command: MenuCommand::ToggleStartup,
                radio: false,
                ..
            }
        )));
    }
}
