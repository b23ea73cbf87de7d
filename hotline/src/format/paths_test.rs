use crate::format::paths::{EditorKind, linkify, preferred_editor_href};

#[test]
fn editor_kind_parses_known_names() {
    assert_eq!(EditorKind::parse("code"), Some(EditorKind::Vscode));
    assert_eq!(EditorKind::parse(" VSCode "), Some(EditorKind::Vscode));
    assert_eq!(EditorKind::parse("file"), Some(EditorKind::File));
    assert_eq!(EditorKind::parse(""), Some(EditorKind::Auto));
    assert_eq!(EditorKind::parse("emacs"), None);
}

#[test]
fn vscode_href_carries_line_after_colon() {
    let href = preferred_editor_href("/nonexistent/app/main.go", Some(12), EditorKind::Vscode);

    assert_eq!(href, "vscode://file//nonexistent/app/main.go:12");
}

#[test]
fn file_href_carries_line_as_fragment() {
    assert_eq!(
        preferred_editor_href("/nonexistent/app/main.go", Some(12), EditorKind::File),
        "file:///nonexistent/app/main.go#L12"
    );
    assert_eq!(
        preferred_editor_href("/nonexistent/app/main.go", None, EditorKind::File),
        "file:///nonexistent/app/main.go"
    );
}

#[test]
fn linkify_wraps_text_in_osc8() {
    let link = linkify("/nonexistent/a.go", Some(3), EditorKind::File, "a.go:3");

    assert_eq!(
        link,
        "\u{1b}]8;;file:///nonexistent/a.go#L3\u{7}a.go:3\u{1b}]8;;\u{7}"
    );
}
