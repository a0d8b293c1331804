//! Terminal colorization for the lot map
//!
//! Applies ANSI escape codes to map glyphs using crossterm.

use crossterm::style::{Color, Stylize};

/// Colour of a node label opened by `open`
fn label_color(open: char) -> Option<(char, Color)> {
    match open {
        '{' => Some(('}', Color::Green)),
        '[' => Some((']', Color::Blue)),
        '(' => Some((')', Color::DarkYellow)),
        _ => None,
    }
}

/// Colorize a rendered map
///
/// - Entrance labels `{E1}`: Green
/// - Free spots `[P1]`: Blue
/// - Occupied spots `(P1)`: Orange (dark yellow)
/// - Route connections: Yellow
/// - Other connections: Grey
/// - Everything else: Default (terminal color)
pub fn colorize_map(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        let mut label: Option<(char, Color)> = None;
        for c in line.chars() {
            let colored = match (label, c) {
                (Some((close, color)), _) => {
                    if c == close {
                        label = None;
                    }
                    format!("{}", c.to_string().with(color))
                }
                (None, '{' | '[' | '(') => {
                    label = label_color(c);
                    let color = label.map_or(Color::Reset, |(_, color)| color);
                    format!("{}", c.to_string().with(color))
                }
                (None, '=' | '#' | '━' | '┃') => format!("{}", c.to_string().with(Color::Yellow)),
                (None, '-' | '|' | '─' | '│') => {
                    format!("{}", c.to_string().with(Color::DarkGrey))
                }
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(colorize_map("entrance free"), "entrance free");
    }

    #[test]
    fn test_labels_are_colored() {
        let output = colorize_map("[P1] (P2) {E1}");
        assert!(output.contains("\x1b["));
        assert_eq!(
            output,
            format!(
                "{}{}{}{} {}{}{}{} {}{}{}{}",
                "[".with(Color::Blue),
                "P".with(Color::Blue),
                "1".with(Color::Blue),
                "]".with(Color::Blue),
                "(".with(Color::DarkYellow),
                "P".with(Color::DarkYellow),
                "2".with(Color::DarkYellow),
                ")".with(Color::DarkYellow),
                "{".with(Color::Green),
                "E".with(Color::Green),
                "1".with(Color::Green),
                "}".with(Color::Green),
            )
        );
    }

    #[test]
    fn test_route_and_connections() {
        let output = colorize_map("=-");
        assert_eq!(
            output,
            format!("{}{}", "=".with(Color::Yellow), "-".with(Color::DarkGrey))
        );
    }

    #[test]
    fn test_preserves_line_structure() {
        let input = "{E1}\n |\n[P1]\n";
        let output = colorize_map(input);
        assert_eq!(output.lines().count(), 3);
        assert!(output.ends_with('\n'));
    }
}
