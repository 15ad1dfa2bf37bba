use super::*;

#[test]
fn test_plain_styling_has_no_escape_codes() {
    let styling = StyleManager::new(false);

    assert_eq!(styling.style_success("ok"), "ok");
    assert_eq!(styling.style_emphasis("Load order:"), "Load order:");
    assert_eq!(styling.format_warning("Lib1 not found"), "! Lib1 not found");
    assert_eq!(styling.format_success("done"), "✓ done");
    assert!(!styling.format_error("boom").contains('\u{1b}'));
}

#[test]
fn test_colored_styling_wraps_text() {
    let styling = StyleManager::new(true);

    let styled = styling.style_error("boom");
    assert!(styled.contains('\u{1b}'));
    assert!(styled.contains("boom"));
    assert_eq!(console::strip_ansi_codes(&styled), "boom");
}

#[test]
fn test_format_info_keeps_message() {
    let styling = StyleManager::new(true);
    let line = styling.format_info("using fixture provider");

    assert_eq!(
        console::strip_ansi_codes(&line),
        "· using fixture provider"
    );
}
