use crate::tests::completion_dsl::{caret, fixture};
use crate::{
    BufferEditor, CompletionConfig, Editor, InsertCommand, ShortenError, TailPolicy, apply_insert,
};
use semantic::{Modifiers, Span, Ty};

fn adapter_command(config: CompletionConfig) -> InsertCommand {
    let list = Ty::generic("List", [Ty::class("String")]);
    let mut f = fixture();
    f.config(config);
    f.class("Main", |c| {
        c.field("names", Ty::array_of(Ty::class("String")), Modifiers::empty());
        c.method("run", Ty::Void, &[], |m| {
            m.local_init("l", list.clone(), caret("n"));
        });
    });
    let ws = f.build();

    ws.complete(2, Some(list.clone()))
        .candidate("Arrays.asList(names)")
        .insert_command()
}

fn insert_at_end(command: &InsertCommand, text: &str) -> (String, u32, usize) {
    let mut editor = BufferEditor::new(text);
    let out = apply_insert(command, text.len() as u32, &mut editor);
    assert_eq!(out.caret, out.tail);
    let flushes = editor.formatting_flushes();
    (editor.into_text(), out.caret, flushes)
}

#[test]
fn insert_adapter_adds_import_and_shortens() {
    let command = adapter_command(CompletionConfig::default());
    assert_eq!(command.text, "Arrays.asList(names)");
    assert_eq!(command.tail, TailPolicy::None);

    let (text, caret, flushes) = insert_at_end(
        &command,
        "package demo;\nimport java.util.List;\n\nList<String> l = ",
    );
    assert_eq!(
        text,
        "package demo;\nimport java.util.List;\nimport java.util.Arrays;\n\nList<String> l = Arrays.asList(names)"
    );
    assert_eq!(caret as usize, text.len());
    assert_eq!(flushes, 1);
}

#[test]
fn insert_adapter_reuses_existing_import() {
    let command = adapter_command(CompletionConfig::default());

    let (text, caret, _) = insert_at_end(&command, "import java.util.Arrays;\nx = ");
    assert_eq!(text, "import java.util.Arrays;\nx = Arrays.asList(names)");
    assert_eq!(caret as usize, text.len());
}

#[test]
fn insert_adapter_imports_at_file_start_without_package() {
    let command = adapter_command(CompletionConfig::default());

    let (text, caret, _) = insert_at_end(&command, "x = ");
    assert_eq!(text, "import java.util.Arrays;\nx = Arrays.asList(names)");
    assert_eq!(caret as usize, text.len());
}

#[test]
fn insert_adapter_keeps_qualified_name_when_shortening_fails() {
    let command = adapter_command(CompletionConfig::default());

    let (text, caret, flushes) = insert_at_end(&command, "import my.Arrays;\n\nx = ");
    assert_eq!(text, "import my.Arrays;\n\nx = java.util.Arrays.asList(names)");
    assert_eq!(caret as usize, text.len());
    assert_eq!(flushes, 1);
}

#[test]
fn insert_adapter_unqualified_when_not_required() {
    let config = CompletionConfig {
        qualify_adapter_calls: false,
        ..CompletionConfig::default()
    };
    let command = adapter_command(config);
    assert_eq!(command.qualification, None);

    let (text, _, flushes) = insert_at_end(&command, "x = ");
    assert_eq!(text, "x = Arrays.asList(names)");
    assert_eq!(flushes, 1);
}

#[test]
fn insert_semicolon_tail_steps_over_existing_semicolon() {
    let command = InsertCommand::plain("ex".to_string(), TailPolicy::Semicolon);
    let mut editor = BufferEditor::new("throw  ;");

    let out = apply_insert(&command, 6, &mut editor);
    assert_eq!(editor.text(), "throw ex ;");
    assert_eq!(out.caret, 10);
    assert_eq!(out.tail, 10);
}

#[test]
fn insert_keeps_caret_inside_call_parens() {
    let command = InsertCommand::plain("items().get()".to_string(), TailPolicy::Semicolon)
        .with_caret(12);
    let mut editor = BufferEditor::new("");

    let out = apply_insert(&command, 0, &mut editor);
    assert_eq!(editor.text(), "items().get();");
    assert_eq!(out.caret, 12);
    assert_eq!(out.tail, 14);
}

#[test]
fn insert_deferred_tail_appends_nothing() {
    let command = InsertCommand::plain("count".to_string(), TailPolicy::UnknownDefer);
    let mut editor = BufferEditor::new("return ");

    let out = apply_insert(&command, 7, &mut editor);
    assert_eq!(editor.text(), "return count");
    assert_eq!(out.tail, 12);
}

#[test]
fn shorten_rejects_bad_ranges() {
    let mut editor = BufferEditor::new("Arrays");

    assert_eq!(
        editor.shorten_references(Span { start: 0, end: 6 }),
        Err(ShortenError::NotQualified {
            text: "Arrays".to_string()
        })
    );
    assert_eq!(
        editor.shorten_references(Span { start: 2, end: 40 }),
        Err(ShortenError::OutOfBounds { start: 2, end: 40 })
    );
    assert_eq!(editor.text(), "Arrays");
}

#[test]
fn buffer_insert_snaps_to_char_boundary() {
    // `é` is two bytes; offset 2 falls inside it.
    let mut editor = BufferEditor::new("né;");
    editor.insert(2, "x");
    assert_eq!(editor.text(), "nxé;");

    editor.insert(100, "!");
    assert_eq!(editor.text(), "nxé;!");
}
