use console::{style, Color};

pub struct OutputFormatter {
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Colors only when stdout is a terminal.
    pub fn for_stdout() -> Self {
        Self::new(console::Term::stdout().features().colors_supported())
    }

    pub fn format_error(&self, message: &str) -> String {
        self.style_text(&format!("\nerror={message}\n"), Color::Red)
    }

    pub fn format_success(&self, message: &str) -> String {
        self.style_text(message, Color::Green)
    }

    pub fn format_notice(&self, message: &str) -> String {
        self.style_text(message, Color::Cyan)
    }

    fn style_text(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            style(text).fg(color).to_string()
        } else {
            text.to_string()
        }
    }
}
