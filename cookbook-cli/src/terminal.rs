use cookbook_core::{Listed, Notifier, View};

/// Lists go to stdout (one line per item, or a JSON array); alerts go to
/// stderr.
#[derive(Debug, Default)]
pub struct TerminalView {
    json: bool,
}

impl TerminalView {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl Notifier for TerminalView {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

impl<T: Listed> View<T> for TerminalView {
    fn render(&mut self, items: &[T]) {
        if self.json {
            match serde_json::to_string_pretty(items) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("cannot encode list: {e}"),
            }
            return;
        }
        for item in items {
            println!("{}", preview(&item.display_line()));
        }
    }
}

fn preview(s: &str) -> String {
    let s = s.replace('\n', " ");
    const MAX: usize = 100;
    if s.chars().count() > MAX {
        let cut: String = s.chars().take(MAX).collect();
        format!("{cut}…")
    } else {
        s
    }
}
