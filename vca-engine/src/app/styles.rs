use owo_colors::{OwoColorize, Stream::Stdout, Style};

// Stylesheet for the run summary
#[derive(Debug, Default)]
pub(crate) struct Styles {
    pub(crate) heading: Style,
    pub(crate) quantity: Style,
    pub(crate) value: Style,
}

impl Styles {
    pub(crate) fn colorize(&mut self) {
        self.heading = Style::new().bright_blue().bold();
        self.quantity = Style::new().bright_green();
        self.value = Style::new().bright_white();
    }

    pub(crate) fn heading(&self, text: &str) -> String {
        text.if_supports_color(Stdout, |text| text.style(self.heading))
            .to_string()
    }

    /// A `quantity: value` line of the summary
    pub(crate) fn entry(&self, quantity: &str, value: impl std::fmt::Display) -> String {
        format!(
            "  {}: {}",
            quantity.if_supports_color(Stdout, |text| text.style(self.quantity)),
            value
                .to_string()
                .if_supports_color(Stdout, |text| text.style(self.value)),
        )
    }
}
