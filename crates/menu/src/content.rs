//! Instructional content shown on the menu overlay.
//!
//! Data only. How the content is laid out or drawn is the presenter's
//! concern; the controller just decides when it is visible.

/// One "how to" entry: what the player does and which binding does it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionItem {
    pub label: String,
    pub binding: String,
}

impl InstructionItem {
    pub fn new(label: impl Into<String>, binding: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            binding: binding.into(),
        }
    }
}

/// External link listed in the overlay footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

/// Everything the overlay presents: title, instructions, play affordance
/// label, footer links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuContent {
    pub title: String,
    pub play_label: String,
    pub instructions: Vec<InstructionItem>,
    pub links: Vec<ExternalLink>,
}

impl MenuContent {
    /// Default walking-experience content: WASD to move, mouse for the
    /// camera, Escape to come back to this menu.
    pub fn how_to_walk() -> Self {
        Self {
            title: "How To Walk".to_string(),
            play_label: "Let's Walk".to_string(),
            instructions: vec![
                InstructionItem::new("Move", "WASD"),
                InstructionItem::new("Camera", "Mouse / Touchpad"),
                InstructionItem::new("Menu", "Esc"),
            ],
            links: Vec::new(),
        }
    }
}

impl Default for MenuContent {
    fn default() -> Self {
        Self::how_to_walk()
    }
}

/// Overlay presenter: shows or hides the instructional content.
///
/// Dismissal is reported through the shell's input mapping rather than a
/// callback here; the controller drives visibility one way.
pub trait ModalPresenter {
    fn show(&mut self, content: &MenuContent);
    fn hide(&mut self);
}
