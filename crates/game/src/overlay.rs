//! Console modal presenter.
//!
//! Stands in for real overlay chrome: prints the instructional content
//! when the menu opens. Layout and imagery are not this shell's concern.

use menu::{MenuContent, ModalPresenter};

#[derive(Debug, Default)]
pub struct ConsoleOverlay;

impl ModalPresenter for ConsoleOverlay {
    fn show(&mut self, content: &MenuContent) {
        println!();
        println!("════ {} ════", content.title);
        for item in &content.instructions {
            println!("  {:<10} {}", item.label, item.binding);
        }
        for link in &content.links {
            println!("  [{}] {}", link.label.to_uppercase(), link.url);
        }
        println!();
        println!("  Enter / Space / Click - {}", content.play_label);
        println!();
    }

    fn hide(&mut self) {
        log::info!("menu hidden; press Escape to come back");
    }
}
