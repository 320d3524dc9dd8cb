//! Loader behavior across every accepted input shape

use pagecraft_document::{load, Document, ElementKind, IdGenerator};

const CANONICAL_WITH_GAPS: &str = r##"{
    "sections": [
        {
            "id": "s-1",
            "layout": "2-equal",
            "columns": [
                { "id": "c-1", "width": 6, "elements": [{ "id": "e-1", "type": "text", "value": "a" }] },
                { "id": "c-2", "width": 6, "widthTablet": 4, "card": true }
            ]
        },
        {
            "id": "s-2",
            "layout": "full-width",
            "background": { "type": "gradient", "gradientFrom": "#ff0000", "gradientTo": "#0000ff", "gradientAngle": 45 },
            "container": { "maxWidth": "max-w-3xl", "paddingX": 0, "paddingY": 8, "paddingTop": 64 },
            "columns": []
        }
    ]
}"##;

const LEGACY_ROWS: &str = r#"{"rows":[{"columns":[{"width":6},{"width":6,"elements":[{"type":"heading","value":"Hi"}]}]}]}"#;

fn inputs() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("empty", None),
        ("canonical", Some(CANONICAL_WITH_GAPS)),
        ("legacy", Some(LEGACY_ROWS)),
        ("plain text", Some("Welcome to our site")),
        ("malformed json", Some(r#"{"sections": [ {"id": "#)),
    ]
}

fn assert_complete(doc: &Document) {
    // Background and container are non-optional in the model; check they
    // carry usable values and every column has its breakpoint widths.
    for section in &doc.sections {
        assert!(!section.id.is_empty());
        assert!(!section.background.color.is_empty());
        assert!(!section.container.max_width.is_empty());
        for column in &section.columns {
            assert!((1..=12).contains(&column.width));
            assert!((1..=12).contains(&column.width_tablet));
            assert!((1..=12).contains(&column.width_mobile));
        }
    }
}

#[test]
fn test_every_input_produces_a_complete_document() {
    for (name, input) in inputs() {
        let doc = load(input, &mut IdGenerator::from_seed("load"));
        assert_complete(&doc);
        if name != "empty" {
            assert!(!doc.is_empty(), "{} produced an empty document", name);
        }
    }
}

#[test]
fn test_load_is_idempotent() -> anyhow::Result<()> {
    for (name, input) in inputs() {
        let mut ids = IdGenerator::from_seed("first");
        let first = load(input, &mut ids);

        let serialized = first.to_json()?;
        let second = load(Some(&serialized), &mut IdGenerator::from_seed("second"));

        assert_eq!(first, second, "reload changed the {} document", name);
    }
    Ok(())
}

#[test]
fn test_canonical_gaps_are_backfilled() {
    let doc = load(Some(CANONICAL_WITH_GAPS), &mut IdGenerator::from_seed("t"));

    let first = &doc.sections[0];
    assert_eq!(first.background.color, "#ffffff");
    assert_eq!(first.container.padding_x, 16);
    assert_eq!(first.container.padding_y, 32);

    let c1 = &first.columns[0];
    assert_eq!((c1.width, c1.width_tablet, c1.width_mobile, c1.card), (6, 6, 12, false));

    let c2 = &first.columns[1];
    assert_eq!((c2.width, c2.width_tablet, c2.width_mobile, c2.card), (6, 4, 12, true));

    let second = &doc.sections[1];
    assert_eq!(second.background.gradient_angle, 45);
    assert_eq!(second.container.max_width, "max-w-3xl");
    assert_eq!(second.container.padding_top, Some(64));
}

#[test]
fn test_legacy_row_scenario() {
    let doc = load(
        Some(r#"{"rows":[{"columns":[{"width":6}]}]}"#),
        &mut IdGenerator::from_seed("t"),
    );

    assert_eq!(doc.sections.len(), 1);
    let section = &doc.sections[0];
    assert_eq!(section.layout, "full-width");
    assert_eq!(section.columns.len(), 1);

    let column = &section.columns[0];
    assert_eq!(column.width, 6);
    assert_eq!(column.width_tablet, 6);
    assert_eq!(column.width_mobile, 12);
    assert!(!column.card);
}

#[test]
fn test_legacy_rows_keep_elements() {
    let doc = load(Some(LEGACY_ROWS), &mut IdGenerator::from_seed("t"));
    let heading = &doc.sections[0].columns[1].elements[0];

    assert!(matches!(heading.kind, ElementKind::Heading));
    assert_eq!(heading.value, "Hi");
    assert!(heading.id.starts_with("t-"));
}

#[test]
fn test_plain_text_scenario() {
    let doc = load(Some("hello"), &mut IdGenerator::from_seed("t"));

    assert_eq!(doc.sections.len(), 1);
    let columns = &doc.sections[0].columns;
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].width, 12);
    assert_eq!(columns[0].elements.len(), 1);

    let element = &columns[0].elements[0];
    assert!(matches!(element.kind, ElementKind::Text));
    assert_eq!(element.value, "hello");
}

#[test]
fn test_malformed_json_is_kept_as_text() {
    let raw = r#"{"sections": [ {"id": "#;
    let doc = load(Some(raw), &mut IdGenerator::from_seed("t"));

    assert_eq!(doc.sections[0].columns[0].elements[0].value, raw);
}

#[test]
fn test_ids_are_unique() {
    let doc = load(Some(LEGACY_ROWS), &mut IdGenerator::from_seed("t"));

    let mut seen = std::collections::HashSet::new();
    for section in &doc.sections {
        assert!(seen.insert(section.id.clone()));
        for column in &section.columns {
            assert!(seen.insert(column.id.clone()));
            for element in &column.elements {
                assert!(seen.insert(element.id.clone()));
            }
        }
    }
}
