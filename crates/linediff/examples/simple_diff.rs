use anyhow::Result;
use linediff::{DiffOptions, TextDiff};

fn main() -> Result<()> {
    // Two sample texts to compare
    let text1 = "This is the first line.\nHere is the second line.\nAnd the third line.";
    let text2 = "This is the first line.\nThis is a completely different second line.\nAnd the third line.\nPlus a new fourth line.";

    let diff = TextDiff::diff(text1, text2, DiffOptions::default())?;

    println!("Unified diff:");
    print!("{}", diff.unified_diff(1));

    let result = diff.result();
    println!("\nDiff statistics:");
    println!("  Changes: {}", result.change_count());
    println!("  Added lines: {}", result.added_lines());
    println!("  Deleted lines: {}", result.deleted_lines());
    println!("  Timed out: {}", result.timed_out);

    println!("\nChanges:");
    for change in result.changes() {
        println!(
            "  {}: old {:?} new {:?}",
            change.change_type(),
            change.original_range(),
            change.modified_range()
        );
    }

    // Whitespace and case insensitive comparison
    let options = DiffOptions::default().ignore_whitespace(true).ignore_case(true);
    let loose = TextDiff::diff("  Hello World\nbye\n", "hello world  \nBYE\n", options)?;
    println!(
        "\nIgnoring whitespace and case, the texts differ: {}",
        loose.result().has_changes()
    );

    Ok(())
}
