use crate::connections::ras::ActiveConnection;

pub const NOT_CONNECTED_TOOLTIP: &str = "Not connected";
pub const CONNECTED_TOOLTIP_PREFIX: &str = "Connected to: ";
pub const EXIT_LABEL: &str = "Exit";

/// Which of the two tray images to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconVariant {
    Connected,
    Disconnected,
}

/// What clicking a menu entry asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Connect(String),
    Disconnect(String),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Profile {
        name: String,
        connected: bool,
        action: MenuAction,
    },
    Separator,
    Exit,
}

impl MenuEntry {
    /// The action bound to this entry; separators have none.
    pub fn action(&self) -> Option<MenuAction> {
        match self {
            MenuEntry::Profile { action, .. } => Some(action.clone()),
            MenuEntry::Separator => None,
            MenuEntry::Exit => Some(MenuAction::Exit),
        }
    }
}

/// Everything the tray shows, rebuilt wholesale from OS state on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayState {
    pub icon: IconVariant,
    pub tooltip: String,
    pub menu: Vec<MenuEntry>,
}

impl TrayState {
    /// Builds the tray from the profile list and the active connections.
    ///
    /// Menu entries follow `profiles` order; the tooltip follows `active` order.
    /// A profile counts as connected on an exact name match.
    pub fn build(profiles: &[String], active: &[ActiveConnection]) -> Self {
        let (icon, tooltip) = if active.is_empty() {
            (IconVariant::Disconnected, NOT_CONNECTED_TOOLTIP.to_string())
        } else {
            let names: Vec<&str> = active.iter().map(|c| c.name.as_str()).collect();
            (
                IconVariant::Connected,
                format!("{}{}", CONNECTED_TOOLTIP_PREFIX, names.join(", ")),
            )
        };

        let mut menu: Vec<MenuEntry> = profiles
            .iter()
            .map(|profile| {
                let connected = active.iter().any(|c| &c.name == profile);
                let action = if connected {
                    MenuAction::Disconnect(profile.clone())
                } else {
                    MenuAction::Connect(profile.clone())
                };
                MenuEntry::Profile {
                    name: profile.clone(),
                    connected,
                    action,
                }
            })
            .collect();
        menu.push(MenuEntry::Separator);
        menu.push(MenuEntry::Exit);

        Self {
            icon,
            tooltip,
            menu,
        }
    }

    /// Profile names whose entries are marked connected, in menu order.
    pub fn connected_profiles(&self) -> Vec<&str> {
        self.menu
            .iter()
            .filter_map(|entry| match entry {
                MenuEntry::Profile {
                    name,
                    connected: true,
                    ..
                } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}
