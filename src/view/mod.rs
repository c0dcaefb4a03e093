//! Displayed state of the recommendation page
//!
//! The two result panels share a single [`Panel`] slot, so showing one always
//! hides the other. The error banner is an overlay on top of whatever panel is
//! currently in the slot.

use serde::Serialize;

pub mod panels;
pub mod render;

pub use panels::{
    ItemPanel, SimilarBookRow, SimilarUserEntry, SourceBookCard, UserBookRow, UserPanel,
};

/// Which result panel (if any) and whether the error banner is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Empty,
    UserShown,
    ItemShown,
    ErrorShown,
}

/// Content of the result area; at most one panel is ever populated
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Panel {
    #[default]
    None,
    User(UserPanel),
    Item(ItemPanel),
}

/// Single-slot error banner; a new message replaces the previous one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSurface {
    message: String,
    visible: bool,
}

impl ErrorSurface {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.message.clear();
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current banner text, `None` while hidden
    pub fn message(&self) -> Option<&str> {
        self.visible.then_some(self.message.as_str())
    }
}

/// Everything the page currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    panel: Panel,
    error: ErrorSurface,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        if self.error.is_visible() {
            return ViewState::ErrorShown;
        }
        match self.panel {
            Panel::None => ViewState::Empty,
            Panel::User(_) => ViewState::UserShown,
            Panel::Item(_) => ViewState::ItemShown,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn error(&self) -> &ErrorSurface {
        &self.error
    }

    pub fn user_panel(&self) -> Option<&UserPanel> {
        match &self.panel {
            Panel::User(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn item_panel(&self) -> Option<&ItemPanel> {
        match &self.panel {
            Panel::Item(panel) => Some(panel),
            _ => None,
        }
    }

    /// Empty both panels and hide the error banner
    pub fn clear_results(&mut self) {
        self.panel = Panel::None;
        self.error.hide();
    }

    /// Show the user panel; the item panel and the error banner are hidden
    pub fn show_user(&mut self, panel: UserPanel) {
        self.error.hide();
        self.panel = Panel::User(panel);
    }

    /// Show the item panel; the user panel and the error banner are hidden
    pub fn show_item(&mut self, panel: ItemPanel) {
        self.error.hide();
        self.panel = Panel::Item(panel);
    }

    /// Overlay the error banner; panels stay as they are
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error.show(message);
    }
}
