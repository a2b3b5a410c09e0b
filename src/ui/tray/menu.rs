use std::collections::HashMap;

use tray_icon::menu::{Icon as MenuIcon, IconMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem};

use crate::core::tray_state::{MenuAction, MenuEntry, TrayState, EXIT_LABEL};

/// A native menu plus the lookup from clicked item to action.
pub struct RenderedMenu {
    pub menu: Menu,
    pub actions: HashMap<MenuId, MenuAction>,
}

/// Renders the menu part of `state`; connected profiles carry the `check` glyph.
pub fn build_menu(state: &TrayState, check: &MenuIcon) -> tray_icon::menu::Result<RenderedMenu> {
    let menu = Menu::new();
    let mut actions = HashMap::new();

    for entry in &state.menu {
        let id = match entry {
            MenuEntry::Profile {
                name, connected, ..
            } => {
                let glyph = connected.then(|| check.clone());
                let item = IconMenuItem::new(name, true, glyph, None);
                menu.append(&item)?;
                Some(item.id().clone())
            }
            MenuEntry::Separator => {
                menu.append(&PredefinedMenuItem::separator())?;
                None
            }
            MenuEntry::Exit => {
                let item = MenuItem::new(EXIT_LABEL, true, None);
                menu.append(&item)?;
                Some(item.id().clone())
            }
        };
        if let (Some(id), Some(action)) = (id, entry.action()) {
            actions.insert(id, action);
        }
    }

    Ok(RenderedMenu { menu, actions })
}
