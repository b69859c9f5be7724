//! Keymap listing for the command line.

use reftransform_core::{KeymapRegistry, KeymapSection};

fn section_title(section: KeymapSection) -> &'static str {
    match section {
        KeymapSection::Operators => "Shortcuts for operators",
        KeymapSection::Modal => "Shortcuts in modal",
    }
}

/// Format all bindings grouped by section.
pub fn format_keymap(keymap: &KeymapRegistry) -> String {
    let mut out = String::new();
    for section in [KeymapSection::Operators, KeymapSection::Modal] {
        out.push_str(&format!("=== {} ===\n", section_title(section)));
        for binding in keymap.section(section) {
            out.push_str(&format!("  {:20} {}\n", binding.format(), binding.label));
        }
        out.push('\n');
    }
    out.push_str("  LMB, Space, Return   Confirm\n");
    out.push_str("  RMB, Escape          Cancel\n");
    out.push_str("  MMB                  Clear constraint\n");
    out
}

/// Print all bindings to stdout.
pub fn print_keymap(keymap: &KeymapRegistry) {
    print!("{}", format_keymap(keymap));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_keymap() {
        let text = format_keymap(&KeymapRegistry::with_defaults());
        assert!(text.contains("=== Shortcuts for operators ==="));
        assert!(text.contains("Ctrl+Alt+G"));
        assert!(text.contains("Move Camera Background"));
        assert!(text.contains("Flip Image Y"));

        let operators = text.find("Ctrl+Alt+S").unwrap();
        let modal = text.find("Constraint X").unwrap();
        assert!(operators < modal);
    }
}
