use anyhow::Result;
use linediff::{ChangeType, DiffOptions, TextDiff};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Wrap the given char span of `line` in a color.
fn highlight(line: &str, start: usize, length: usize, color: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let before: String = chars[..start].iter().collect();
    let span: String = chars[start..start + length].iter().collect();
    let after: String = chars[start + length..].iter().collect();
    format!("{}{}{}{}{}", before, color, span, RESET, after)
}

fn main() -> Result<()> {
    let code1 = "fn total(items: &[Item]) -> u32 {\n    items.iter().map(|i| i.price).sum()\n}\n";
    let code2 = "fn total(items: &[Item]) -> u64 {\n    items.iter().map(|i| i.price * i.quantity).sum()\n}\n";

    let diff = TextDiff::diff(code1, code2, DiffOptions::default())?;

    for change in diff.result().changes() {
        if change.change_type() != ChangeType::Modified {
            continue;
        }
        let Some(spans) = &change.char_changes else {
            continue;
        };

        for span in spans {
            let old_line = diff.old_line(span.original_line).unwrap_or_default();
            let new_line = diff.new_line(span.modified_line).unwrap_or_default();
            println!(
                "-{}",
                highlight(&old_line, span.original_start, span.original_length, RED)
            );
            println!(
                "+{}",
                highlight(&new_line, span.modified_start, span.modified_length, GREEN)
            );
        }
    }

    Ok(())
}
