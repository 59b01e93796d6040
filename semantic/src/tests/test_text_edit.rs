use crate::{Span, TextEdit, apply_text_edits, rebase_offset};

#[test]
fn text_edit_applies_sorted_edits_and_rebases_cursor() {
    let edits = vec![
        TextEdit::insert(0, "import a.B;\n"),
        TextEdit::replace(Span { start: 4, end: 7 }, "B"),
    ];

    let (text, cursor) = apply_text_edits("x = a.B.of()", &edits, 12);
    assert_eq!(text, "import a.B;\nx = B.of()");
    assert_eq!(cursor, 22);
}

#[test]
fn text_edit_cursor_inside_replacement_snaps_to_start() {
    let edits = vec![TextEdit::replace(Span { start: 2, end: 8 }, "xy")];

    assert_eq!(rebase_offset(5, &edits), 2);
    assert_eq!(rebase_offset(8, &edits), 4);
    assert_eq!(rebase_offset(1, &edits), 1);
}
