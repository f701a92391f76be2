//! Built-in help text.
//!
//! The help view is a regular text view over these lines, so it can be
//! filtered and scrolled like any file.

use crate::view_state::RawContent;

const KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        "Moving around",
        &[
            ("↑ ↓", "Scroll one line up or down"),
            ("← →", "Scroll one column left or right (wrapping off)"),
            ("Shift+← Shift+→", "Scroll 20 columns left or right"),
            ("b PgUp Shift+↑", "Page up"),
            ("Space PgDn Shift+↓", "Page down"),
            ("g < Home", "Go to the first line"),
            ("G > End", "Go to the last line"),
            ("n", "Next line matching a filter"),
            ("p", "Previous line matching a filter"),
            ("Tab Ctrl+g", "Go to line number"),
            ("/", "Search (only when no filter is defined)"),
        ],
    ),
    (
        "Filters",
        &[
            ("f Enter", "New filter with one keyword"),
            ("+ =", "Add a keyword to the last filter"),
            ("e", "Edit the last keyword"),
            ("- _", "Remove the last keyword"),
            ("F Backspace", "Remove the last filter"),
            ("d Ctrl+← Ctrl+→", "Swap the two last filters"),
            ("w Ctrl+↑", "Rotate filters up"),
            ("s Ctrl+↓", "Rotate filters down"),
            ("i", "Toggle case sensitivity of the last filter"),
            ("x", "Toggle showing or hiding lines of the last filter"),
            ("~", "Toggle whether the last keyword must be present or absent"),
            ("( )", "Rotate keywords of the last filter left or right"),
        ],
    ),
    (
        "Display",
        &[
            ("l", "Toggle line numbers"),
            ("k", "Toggle line wrapping"),
            ("*", "Toggle bullets on wrapped lines"),
            (".", "Toggle showing spaces"),
            ("m M", "Reveal more or fewer lines around matches"),
            ("h H", "Next or previous colorize mode"),
            ("a A", "Next or previous SGR mode"),
            ("c C", "Next or previous color palette"),
        ],
    ),
    (
        "Slots",
        &[
            ("\\", "Save filters to a new slot"),
            ("|", "Delete the current slot"),
            ("]", "Load the next slot"),
            ("[", "Load the previous slot"),
        ],
    ),
    (
        "Views",
        &[
            ("1 2 3", "Show view 1, 2 or 3"),
            ("! @ #", "Copy current filters to view 1, 2 or 3 and show it"),
            ("?", "Toggle this help"),
        ],
    ),
    (
        "Reload",
        &[
            ("r", "Reload the file and go to the top"),
            ("t", "Reload the file and go to the end"),
            ("R", "Toggle reloading on change, going to the top"),
            ("T", "Toggle reloading on change, following the end"),
        ],
    ),
    ("Leaving", &[("q Ctrl+c", "Quit (closes help when shown)")]),
];

/// Help text, one key binding per line.
pub fn help_lines() -> Vec<String> {
    let key_width = KEYS
        .iter()
        .flat_map(|(_, keys)| keys.iter())
        .map(|(keys, _)| keys.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!("  ~ sift {} help ~", env!("CARGO_PKG_VERSION")),
        String::new(),
    ];
    for (section, keys) in KEYS {
        lines.push((*section).to_string());
        for (key, description) in *keys {
            lines.push(format!("  {key:<key_width$}  {description}"));
        }
        lines.push(String::new());
    }
    lines
}

/// Help text as content for the help view.
pub fn help_content() -> RawContent {
    RawContent::from_lines(help_lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_title() {
        let lines = help_lines();
        assert!(lines[0].contains("sift"));
        assert!(lines[1].is_empty());
    }

    #[test]
    fn every_section_is_listed() {
        let lines = help_lines();
        for (section, _) in KEYS {
            assert!(lines.iter().any(|l| l == *section), "missing {section}");
        }
    }

    #[test]
    fn descriptions_are_aligned() {
        let lines = help_lines();
        let columns: Vec<usize> = KEYS
            .iter()
            .flat_map(|(_, keys)| keys.iter())
            .map(|(key, description)| {
                let prefix = format!("  {key} ");
                let line = lines.iter().skip(2).find(|l| l.starts_with(&prefix)).unwrap();
                line.chars().count() - description.chars().count()
            })
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn content_matches_lines() {
        assert_eq!(help_content().len(), help_lines().len());
    }
}
