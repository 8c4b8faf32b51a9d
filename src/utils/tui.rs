use indicatif::{ProgressBar, ProgressStyle};

use crate::render::Theme;

/// Spinner template, colored to match the theme.
fn spinner_template(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "{spinner:.cyan} {msg} {elapsed:.dim}",
        Theme::Dark => "{spinner:.cyan.bold} {msg} {elapsed:.dim}",
    }
}

/// Spinner for `watch`, showing how long reminders have been running.
pub fn create_watch_spinner(message: String, theme: Theme) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["◐", "◓", "◑", "◒", "●"])
        .template(spinner_template(theme))
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(250));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_parse_for_both_themes() {
        for theme in [Theme::Light, Theme::Dark] {
            assert!(ProgressStyle::default_spinner()
                .template(spinner_template(theme))
                .is_ok());
        }
    }
}
