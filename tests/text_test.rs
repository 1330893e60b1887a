use corenlp_client::normalize_text;

#[test]
fn test_collapses_blank_runs() {
    assert_eq!(normalize_text("The  cat\t\tsat"), "The cat sat");
    assert_eq!(normalize_text("全角\u{3000}\u{3000}空白"), "全角 空白");
}

#[test]
fn test_keeps_line_count() {
    let input = "first  line\r\n\n  third line  \n";
    let output = normalize_text(input);
    assert_eq!(output, "first line\n\nthird line\n");
    assert_eq!(output.split('\n').count(), input.split('\n').count());
}

#[test]
fn test_idempotent() {
    for input in [
        "",
        "   ",
        "a \t b\r\n c \u{3000}d",
        "\u{a0} x \u{a0}\n\ty",
        "already clean\ntext",
    ] {
        let once = normalize_text(input);
        assert_eq!(normalize_text(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_no_leading_or_trailing_blanks() {
    for line in normalize_text("  a  \n\t b\t\n\u{3000}c\u{3000}").split('\n') {
        assert_eq!(line, line.trim());
    }
}

#[test]
fn test_carriage_returns_removed_inside_lines() {
    assert_eq!(normalize_text("a\r\rb"), "ab");
    assert_eq!(normalize_text("a \r b"), "a b");
    assert_eq!(normalize_text("\r a\u{3000}\tb \r"), "a b");
}
