use anyhow::Result;
use unagi::extractor::NOTICE_EXPRESSION;
use unagi::{Extractor, ExtractionResult, Filters};

#[test]
fn extract_empty() {
    let extractor = Extractor::default();

    assert_eq!(extractor.extract(""), ExtractionResult::empty());
    assert_eq!(extractor.extract("  \n\t"), ExtractionResult::empty());
    assert_eq!(extractor.extract_bytes(b""), ExtractionResult::empty());
}

#[test]
fn extract_without_notices() {
    let content = include_str!("fixtures/none.html");

    let info = Extractor::default().extract(content);

    assert_eq!(info.count, 0);
    assert_eq!(info.content, "");
}

#[test]
fn extract_buffered() {
    let content = include_str!("fixtures/buffered.html");

    let info = Extractor::default().extract(content);

    assert_eq!(info.count, 3);
    let lines = info.content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("outdated version of PHP"));
    assert!(lines[1].contains("Akismet is almost ready."));
    assert_eq!(lines[2], r#"<div class="notice"><p>Settings saved.</p></div>"#);

    assert!(!info.content.contains("update-nag"));
    assert!(!info.content.contains("noticeable"));
    assert!(!info.content.contains("No standalone token"));
    assert!(!info.content.contains("wrap"));
}

#[test]
fn extract_single_notice_verbatim() {
    let notice = r#"<div class="notice notice-success"><p>Done.</p></div>"#;

    let info = Extractor::default().extract(notice);

    assert_eq!(info.count, 1);
    assert_eq!(info.content, notice);
}

#[test]
fn extract_token_boundaries() {
    let extractor = Extractor::default();

    for class in ["notice", "a notice", "notice b", "a notice b", "  notice  "] {
        let html = format!(r#"<div class="{class}">x</div>"#);
        assert_eq!(extractor.extract(&html).count, 1, "{class:?}");
    }
    for class in ["noticeable", "notices", "my-notice", "notice-info", "Notices"] {
        let html = format!(r#"<div class="{class}">x</div>"#);
        assert_eq!(extractor.extract(&html).count, 0, "{class:?}");
    }
}

#[test]
fn extract_multibyte() {
    let content = include_str!("fixtures/multibyte.html");

    let info = Extractor::default().extract(content);

    assert_eq!(info.count, 1);
    assert!(info.content.contains("Réglages enregistrés ✓"));
    assert!(info.content.contains("設定を保存しました"));
}

#[test]
fn extract_leading_bom() {
    let info = Extractor::default().extract("\u{feff}<div class=\"notice\">x</div>");

    assert_eq!(info.count, 1);
    assert_eq!(info.content, r#"<div class="notice">x</div>"#);
}

#[test]
fn extract_invalid_bytes() {
    let info = Extractor::default().extract_bytes(b"<div class=\"notice\">caf\xE9</div>");

    assert_eq!(info.count, 1);
    assert!(info.content.contains('\u{fffd}'));
}

#[test]
fn extract_malformed() {
    let content = include_str!("fixtures/malformed.html");

    let info = Extractor::default().extract(content);

    // the second notice ends up nested inside the first one
    assert_eq!(info.count, 2);
    assert!(info.content.starts_with(r#"<div class="notice notice-error">"#));
    assert!(info.content.contains("never closed"));
}

#[test]
fn extract_garbage() {
    let extractor = Extractor::default();

    for raw in ["<", "<div class=", "</div></div>", "<<<>>>", "<!--", "<div class=\"notice"] {
        assert_eq!(extractor.extract(raw), ExtractionResult::empty(), "{raw:?}");
    }
}

#[test]
fn extract_is_idempotent() {
    let content = include_str!("fixtures/buffered.html");
    let extractor = Extractor::default();

    let first = extractor.extract(content);
    let second = extractor.extract(content);

    assert_eq!(first, second);
}

#[test]
fn extract_with_expression() -> Result<()> {
    let content = include_str!("fixtures/buffered.html");

    let info = Extractor::new(".update-nag, .notice")?.extract(content);

    assert_eq!(info.count, 4);
    assert!(info.content.contains("WordPress 6.4 is available!"));
    Ok(())
}

#[test]
fn extract_with_selector_filter() {
    let content = include_str!("fixtures/buffered.html");
    let filters = Filters::default().selector(|expression| format!("{expression}, .update-nag"));

    let extractor = Extractor::from_filters(&filters, None);

    assert_eq!(extractor.expression(), format!("{NOTICE_EXPRESSION}, .update-nag"));
    assert_eq!(extractor.extract(content).count, 4);
}

#[test]
fn extract_with_configured_expression() {
    let content = include_str!("fixtures/buffered.html");

    let extractor = Extractor::from_filters(&Filters::default(), Some(".update-nag"));

    let info = extractor.extract(content);
    assert_eq!(info.count, 1);
    assert_eq!(info.content, r#"<div class="update-nag">WordPress 6.4 is available!</div>"#);
}
