#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    Toggle,
    LinkClicked,
    ClickedOutside,
    EscapePressed,
    Resized { width: f64 },
}

/// Open/closed state of the collapsible navigation on narrow screens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobileMenu {
    open: bool,
    breakpoint_px: f64,
}

impl MobileMenu {
    pub fn new(breakpoint_px: f64) -> Self {
        Self {
            open: false,
            breakpoint_px,
        }
    }

    /// Returns whether the state changed.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = match event {
            MenuEvent::Toggle => !self.open,
            MenuEvent::LinkClicked | MenuEvent::ClickedOutside | MenuEvent::EscapePressed => false,
            MenuEvent::Resized { width } if width > self.breakpoint_px => false,
            MenuEvent::Resized { .. } => self.open,
        };
        let changed = next != self.open;
        self.open = next;
        changed
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_and_close_paths() {
        let mut menu = MobileMenu::new(768.0);
        assert!(menu.handle(MenuEvent::Toggle));
        assert!(menu.is_open());
        assert!(menu.handle(MenuEvent::LinkClicked));
        assert!(!menu.is_open());
        assert!(!menu.handle(MenuEvent::EscapePressed));

        menu.handle(MenuEvent::Toggle);
        assert!(!menu.handle(MenuEvent::Resized { width: 768.0 }));
        assert!(menu.is_open());
        assert!(menu.handle(MenuEvent::Resized { width: 1024.0 }));
        assert!(!menu.is_open());
    }

    #[test]
    fn outside_click_closes() {
        let mut menu = MobileMenu::new(768.0);
        menu.handle(MenuEvent::Toggle);
        assert!(menu.handle(MenuEvent::ClickedOutside));
        assert!(menu.handle(MenuEvent::Toggle));
        assert!(menu.is_open());
    }
}
