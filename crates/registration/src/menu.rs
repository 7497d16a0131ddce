//! Main navigation menu state. Routing targets live with the front-end.

pub const MENU_GROUPS: [&str; 4] = ["Academics", "Alumni", "Registration", "Revenue"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Enter,
    Space,
    Escape,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainMenu {
    open_dropdown: Option<usize>,
    mobile_open: bool,
}

impl MainMenu {
    pub fn open_dropdown(&self) -> Option<&'static str> {
        self.open_dropdown.map(|index| MENU_GROUPS[index])
    }

    pub fn is_open(&self, group: &str) -> bool {
        self.open_dropdown() == Some(group)
    }

    pub fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }

    /// Opens `group`'s dropdown, or closes it when it is already open.
    pub fn click(&mut self, group: &str) {
        let Some(index) = MENU_GROUPS.iter().position(|name| *name == group) else {
            tracing::debug!(group, "ignoring click on unknown menu group");
            return;
        };
        self.open_dropdown = if self.open_dropdown == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Pointer entering a group button acts like a click.
    pub fn hover(&mut self, group: &str) {
        self.click(group);
    }

    pub fn key(&mut self, group: &str, key: MenuKey) {
        match key {
            MenuKey::Enter | MenuKey::Space => self.click(group),
            MenuKey::Escape => self.open_dropdown = None,
            MenuKey::Other => {}
        }
    }

    pub fn outside_click(&mut self) {
        self.open_dropdown = None;
    }

    /// Following a menu entry closes both the dropdown and the mobile menu.
    pub fn select_option(&mut self) {
        self.open_dropdown = None;
        self.mobile_open = false;
    }

    pub fn toggle_mobile(&mut self) {
        self.mobile_open = !self.mobile_open;
    }
}
