use linediff::{apply, ChangeType, Deadline, DiffEngine, DiffOptions, TextDiff};
use std::time::{Duration, Instant};

#[test]
fn test_newlines_at_end() {
    // Trailing newlines never produce a phantom line
    let cases = [
        ("Line 1\nLine 2\n", "Line 1\nLine X\n"),
        ("Line 1\nLine 2\n", "Line 1\nLine X"),
        ("Line 1\nLine 2", "Line 1\nLine X\n"),
        ("Line 1\nLine 2", "Line 1\nLine X"),
    ];

    for (old, new) in cases {
        let diff = TextDiff::diff(old, new, DiffOptions::default()).unwrap();
        assert_eq!(diff.result().changes().len(), 1, "{:?} -> {:?}", old, new);
        assert_eq!(
            diff.result().changes()[0].original_range(),
            1..2,
            "{:?} -> {:?}",
            old,
            new
        );
    }
}

#[test]
fn test_crlf_matches_lf() {
    let diff = TextDiff::diff("a\r\nb\r\n", "a\nb\n", DiffOptions::default()).unwrap();
    assert!(!diff.result().has_changes());
}

#[test]
fn test_empty_texts() {
    let diff = TextDiff::diff("", "", DiffOptions::default()).unwrap();
    assert!(!diff.result().has_changes());
    assert_eq!(diff.unified_diff(3), "");
}

#[test]
fn test_binary_looking_content() {
    let original = ["\u{0}\u{1}\u{2}", "\u{fffd}\u{fffd}", "plain"];
    let modified = ["\u{0}\u{1}", "plain", "\u{7f}"];
    let engine = DiffEngine::new(DiffOptions::default()).unwrap();
    let result = engine.diff(&original, &modified);

    assert!(result.is_valid_cover(original.len(), modified.len()));
    let script = result.edit_script(original.len(), modified.len());
    assert_eq!(apply(&script, &original, &modified), Some(modified.to_vec()));
}

#[test]
fn test_wildly_different_lengths() {
    let original = vec!["x".to_string(); 1];
    let modified: Vec<String> = (0..5000).map(|i| format!("line {}", i)).collect();
    let engine = DiffEngine::new(DiffOptions::default()).unwrap();
    let result = engine.diff(&original, &modified);

    assert_eq!(result.change_count(), 1);
    let change = &result.changes()[0];
    assert_eq!(change.original_range(), 0..1);
    assert_eq!(change.modified_range(), 0..5000);
    assert!(result.is_valid_cover(original.len(), modified.len()));
}

#[test]
fn test_duplicate_lines() {
    let original = ["}", "}", "}", "x", "}"];
    let modified = ["}", "x", "}", "}"];
    let engine = DiffEngine::new(DiffOptions::default()).unwrap();
    let result = engine.diff(&original, &modified);

    assert!(result.is_valid_cover(original.len(), modified.len()));
    assert_eq!(result.deleted_lines() - result.added_lines(), 1);
}

#[test]
fn test_very_large_diff() {
    let mut old = Vec::new();
    let mut new = Vec::new();

    // 1000 lines, every 10th line different
    for i in 0..1000 {
        old.push(format!("Line {} of old text", i));
        if i % 10 == 0 {
            new.push(format!("MODIFIED Line {} of new text", i));
        } else {
            new.push(format!("Line {} of old text", i));
        }
    }

    let engine = DiffEngine::new(DiffOptions::default()).unwrap();
    let result = engine.diff(&old, &new);

    assert!(!result.timed_out);
    assert_eq!(result.change_count(), 100);
    assert!(result
        .changes()
        .iter()
        .all(|c| c.change_type() == ChangeType::Modified && c.char_changes.is_some()));
}

#[test]
fn test_tiny_deadline_on_disjoint_inputs() {
    let original: Vec<String> = (0..10_000).map(|i| format!("original {}", i)).collect();
    let modified: Vec<String> = (0..10_000).map(|i| format!("modified {}", i)).collect();
    let options = DiffOptions::default().max_computation_time(Duration::from_millis(1));
    let engine = DiffEngine::new(options).unwrap();

    let started = Instant::now();
    let result = engine.diff(&original, &modified);
    let elapsed = started.elapsed();

    assert!(result.timed_out);
    assert!(result.is_valid_cover(original.len(), modified.len()));
    assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);

    let script = result.edit_script(original.len(), modified.len());
    assert_eq!(apply(&script, &original, &modified), Some(modified.clone()));
}

#[test]
fn test_expired_deadline_on_partial_overlap() {
    let original: Vec<String> = (0..300).map(|i| format!("{}", i % 7)).collect();
    let modified: Vec<String> = (0..280).map(|i| format!("{}", i % 5)).collect();
    let engine = DiffEngine::new(DiffOptions::default()).unwrap();
    let result = engine.diff_until(&original, &modified, Deadline::at(Instant::now()));

    assert!(result.timed_out);
    assert!(result.is_valid_cover(original.len(), modified.len()));
    let script = result.edit_script(original.len(), modified.len());
    assert_eq!(apply(&script, &original, &modified), Some(modified.clone()));
}

#[test]
fn test_identity_is_never_timed_out() {
    let lines: Vec<String> = (0..20_000).map(|i| format!("line {}", i)).collect();
    let options = DiffOptions::default().max_computation_time(Duration::from_nanos(1));
    let engine = DiffEngine::new(options).unwrap();
    let result = engine.diff(&lines, &lines);

    assert!(!result.has_changes());
    assert!(!result.timed_out);
}
