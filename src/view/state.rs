use crate::model::Language;

/// Per-view UI toggles. Changed only through [`ViewEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub language: Language,
    pub dark_mode: bool,
    pub settings_open: bool,
    pub cart_open: bool,
    pub orders_open: bool,
    pub listening: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    SetLanguage(Language),
    ToggleDarkMode,
    ToggleSettings,
    ToggleCart,
    ToggleOrders,
    SetListening(bool),
}

impl ViewState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::SetLanguage(language) => self.language = language,
            ViewEvent::ToggleDarkMode => self.dark_mode = !self.dark_mode,
            ViewEvent::ToggleSettings => self.settings_open = !self.settings_open,
            ViewEvent::ToggleCart => self.cart_open = !self.cart_open,
            ViewEvent::ToggleOrders => self.orders_open = !self.orders_open,
            ViewEvent::SetListening(listening) => self.listening = listening,
        }
    }
}
