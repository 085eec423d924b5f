//! Label overrides and the visibility/separator normalization pass.

use std::collections::HashMap;

use crate::models::MenuEntry;

/// Replace labels of top-level entries whose id has an override.
///
/// Empty overrides are ignored. Submenu contents are left untouched.
pub fn apply_labels(entries: &mut [MenuEntry], labels: &HashMap<String, String>) {
    if labels.is_empty() {
        return;
    }

    for action in entries.iter_mut().filter_map(MenuEntry::as_action_mut) {
        if let Some(label) = labels.get(&action.id).filter(|label| !label.is_empty()) {
            action.label.clone_from(label);
        }
    }
}

/// Drop hidden entries, then collapse redundant separators.
///
/// A separator is dropped when nothing has been kept before it, when it is
/// the last entry, or when the next entry is also a separator. The result
/// never starts or ends with a separator and never has two in a row.
pub fn normalize(entries: Vec<MenuEntry>) -> Vec<MenuEntry> {
    let visible: Vec<MenuEntry> = entries.into_iter().filter(MenuEntry::is_visible).collect();
    let last = visible.len().saturating_sub(1);

    let mut kept_any = false;
    let mut normalized = Vec::with_capacity(visible.len());
    let mut iter = visible.into_iter().enumerate().peekable();

    while let Some((index, entry)) = iter.next() {
        if entry.is_separator() {
            let next_is_separator = iter.peek().is_some_and(|(_, next)| next.is_separator());
            if !kept_any || index == last || next_is_separator {
                continue;
            }
        } else {
            kept_any = true;
        }
        normalized.push(entry);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(id: &str) -> MenuEntry {
        MenuEntry::action(id, id.to_uppercase())
    }

    fn sep() -> MenuEntry {
        MenuEntry::Separator
    }

    fn shape(entries: &[MenuEntry]) -> String {
        entries
            .iter()
            .map(|e| e.id().map(str::to_string).unwrap_or_else(|| "-".to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn assert_well_formed(entries: &[MenuEntry]) {
        assert!(!entries.first().is_some_and(MenuEntry::is_separator), "{}", shape(entries));
        assert!(!entries.last().is_some_and(MenuEntry::is_separator), "{}", shape(entries));
        for pair in entries.windows(2) {
            assert!(!(pair[0].is_separator() && pair[1].is_separator()), "{}", shape(entries));
        }
    }

    #[test]
    fn test_strips_leading_and_trailing() {
        let out = normalize(vec![sep(), sep(), a("x"), sep()]);
        assert_eq!(shape(&out), "x");
    }

    #[test]
    fn test_collapses_runs() {
        let out = normalize(vec![a("x"), sep(), sep(), sep(), a("y")]);
        assert_eq!(shape(&out), "x - y");
    }

    #[test]
    fn test_hidden_entries_are_removed_before_collapsing() {
        let out = normalize(vec![
            a("x"),
            sep(),
            a("hidden").visible(false),
            sep(),
            a("y"),
            sep(),
            a("gone").visible(false),
        ]);
        assert_eq!(shape(&out), "x - y");
    }

    #[test]
    fn test_only_separators_and_hidden() {
        assert!(normalize(vec![sep(), a("h").visible(false), sep()]).is_empty());
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_disabled_entries_are_kept() {
        let out = normalize(vec![a("x").enabled(false)]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_well_formed_for_every_small_layout() {
        // Every sequence of length <= 6 over {action, hidden action, separator}.
        for len in 0..=6u32 {
            for mut code in 0..3usize.pow(len) {
                let mut entries = Vec::new();
                for i in 0..len {
                    entries.push(match code % 3 {
                        0 => a(&format!("a{i}")),
                        1 => a(&format!("h{i}")).visible(false),
                        _ => sep(),
                    });
                    code /= 3;
                }
                let visible_actions =
                    entries.iter().filter(|e| !e.is_separator() && e.is_visible()).count();

                let out = normalize(entries);
                assert_well_formed(&out);
                assert_eq!(out.iter().filter(|e| !e.is_separator()).count(), visible_actions);
            }
        }
    }

    #[test]
    fn test_labels_apply_to_top_level_only() {
        let mut entries = vec![
            a("copy"),
            MenuEntry::submenu("tools", "Tools", vec![a("copy")]),
            sep(),
        ];
        let labels = HashMap::from([("copy".to_string(), "Duplicate".to_string())]);

        apply_labels(&mut entries, &labels);

        assert_eq!(entries[0].label(), Some("Duplicate"));
        assert_eq!(entries[1].submenu_items().unwrap()[0].label(), Some("COPY"));
    }

    #[test]
    fn test_empty_label_override_is_ignored() {
        let mut entries = vec![a("copy"), a("paste")];
        let labels = HashMap::from([
            ("copy".to_string(), String::new()),
            ("paste".to_string(), "Insert".to_string()),
        ]);

        apply_labels(&mut entries, &labels);

        assert_eq!(entries[0].label(), Some("COPY"));
        assert_eq!(entries[1].label(), Some("Insert"));
    }
}
