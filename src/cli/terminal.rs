use crate::prelude::{Contact, NoticeKind, Presenter, View};

/// Prints contacts and notices to the terminal.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    /// Suppresses the listing, for commands that only report an outcome.
    pub quiet: bool,
}

impl TerminalPresenter {
    pub fn quiet() -> Self {
        TerminalPresenter { quiet: true }
    }
}

impl Presenter for TerminalPresenter {
    fn render(&self, view: &View<'_>) {
        if self.quiet {
            return;
        }

        if view.is_empty() {
            println!("No contacts found.");
        }

        for (mut i, c) in view.iter().enumerate() {
            i += 1;
            println!("{}", listing_line(i, c));
        }

        println!("Total Contacts: {}", view.len());
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => println!("{}", escape(message)),
            NoticeKind::Error => eprintln!("Error: {}", escape(message)),
        }
    }
}

pub fn listing_line(i: usize, c: &Contact) -> String {
    let mut line = format!(
        "{i:>3}. [{}] {:<20} {:<30} {:<15}",
        c.id,
        escape(&c.name),
        escape(&c.email),
        escape(&c.phone)
    );

    if let Some(address) = &c.address {
        line.push_str(&format!(" {}", escape(address)));
    }

    line.push_str(&format!("  Added: {}", c.added_on()));
    if let Some(updated) = c.updated_on() {
        line.push_str(&format!("  Updated: {updated}"));
    }
    line
}

/// Replaces control characters so stored text cannot move the cursor or
/// change terminal colours.
pub fn escape(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}
