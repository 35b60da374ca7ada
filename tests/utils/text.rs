use lazyworktree::utils::text::{display_width, pad_to_width, take_width, truncate_to_width, wrap_lines};

#[test]
fn test_wrap_keeps_blank_lines() {
    let lines = wrap_lines("first paragraph\n\nsecond", 40);
    assert_eq!(lines, vec!["first paragraph", "", "second"]);
}

#[test]
fn test_wrap_breaks_long_words() {
    let lines = wrap_lines(&"x".repeat(25), 10);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| display_width(line) <= 10));
}

#[test]
fn test_wrap_empty_text_yields_one_line() {
    assert_eq!(wrap_lines("", 10), vec![String::new()]);
}

#[test]
fn test_width_helpers_count_cells() {
    assert_eq!(display_width("日本"), 4);
    assert_eq!(take_width("日本語", 5), "日本");
    assert_eq!(truncate_to_width("日本語", 5), "日本…");
    assert_eq!(pad_to_width("ab", 4), "ab  ");
    assert_eq!(pad_to_width("abcdef", 4), "abc…");
}
