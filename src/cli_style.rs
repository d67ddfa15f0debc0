use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;

fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Help output colors shared by the command line tools.
pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(fg(AnsiColor::Blue).bold().underline())
        .header(fg(AnsiColor::Blue).bold().underline())
        .literal(fg(AnsiColor::Green).bold())
        .placeholder(fg(AnsiColor::Yellow))
        .valid(fg(AnsiColor::Green).bold())
        .invalid(fg(AnsiColor::Red).bold())
        .error(fg(AnsiColor::Red).bold())
}
