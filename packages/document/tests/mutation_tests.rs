//! Comprehensive mutation tests

use std::sync::Arc;

use pagecraft_document::{
    BackgroundField, BackgroundKind, Breakpoint, ColumnPath, ContainerField, Document, ElementKind,
    ElementType, ElementUpdate, IdGenerator, ListKind, Mutation, MutationError, Side, SpacingKey,
    TextAlign,
};

fn apply_all(mutations: &[Mutation], ids: &mut IdGenerator) -> Document {
    mutations
        .iter()
        .fold(Document::new(), |doc, m| m.apply(&doc, ids).unwrap())
}

/// Two sections: a 2-equal one with a heading, text and list in column 0,
/// and a full-width one with a nested column holding an image.
fn fixture(ids: &mut IdGenerator) -> Document {
    let col = ColumnPath::top(0, 0);
    apply_all(
        &[
            Mutation::AddSection {
                layout: "2-equal".to_string(),
            },
            Mutation::AddElement {
                column: col,
                element_type: ElementType::Heading,
            },
            Mutation::AddElement {
                column: col,
                element_type: ElementType::Text,
            },
            Mutation::AddElement {
                column: col,
                element_type: ElementType::List,
            },
            Mutation::AddSection {
                layout: "full-width".to_string(),
            },
            Mutation::AddColumn {
                section: 1,
                parent: Some(0),
            },
            Mutation::AddElement {
                column: ColumnPath::nested(1, 0, 0),
                element_type: ElementType::Image,
            },
        ],
        ids,
    )
}

#[test]
fn test_add_section_from_layout() {
    let doc = Mutation::AddSection {
        layout: "2-sidebar-left".to_string(),
    }
    .apply(&Document::new(), &mut IdGenerator::from_seed("t"))
    .unwrap();

    let section = &doc.sections[0];
    let widths: Vec<u8> = section.columns.iter().map(|c| c.width).collect();
    assert_eq!(widths, vec![4, 8]);
    for column in &section.columns {
        assert_eq!(column.width_tablet, 12);
        assert_eq!(column.width_mobile, 12);
        assert!(column.elements.is_empty());
    }
    assert_eq!(section.background.kind, BackgroundKind::Solid);
    assert_eq!(section.background.color, "#ffffff");
    assert_eq!(section.container.max_width, "max-w-7xl");
    assert_eq!((section.container.padding_x, section.container.padding_y), (16, 32));
}

#[test]
fn test_add_section_unknown_layout() {
    let doc = Mutation::AddSection {
        layout: "mystery".to_string(),
    }
    .apply(&Document::new(), &mut IdGenerator::from_seed("t"))
    .unwrap();

    assert_eq!(doc.sections[0].layout, "mystery");
    assert_eq!(doc.sections[0].columns.len(), 1);
    assert_eq!(doc.sections[0].columns[0].width, 12);
}

#[test]
fn test_add_then_remove_restores_sections() {
    let mut ids = IdGenerator::from_seed("t");
    let before = fixture(&mut ids);

    let added = Mutation::AddSection {
        layout: "3-equal".to_string(),
    }
    .apply(&before, &mut ids)
    .unwrap();
    assert_eq!(added.sections.len(), 3);

    let after = Mutation::RemoveSection { section: 2 }
        .apply(&added, &mut ids)
        .unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_add_then_remove_restores_columns() {
    let mut ids = IdGenerator::from_seed("t");
    let before = fixture(&mut ids);

    let added = Mutation::AddColumn {
        section: 0,
        parent: None,
    }
    .apply(&before, &mut ids)
    .unwrap();
    let new_column = &added.sections[0].columns[2];
    assert_eq!(
        (new_column.width, new_column.width_tablet, new_column.width_mobile),
        (6, 12, 12)
    );

    let after = Mutation::RemoveColumn {
        path: ColumnPath::top(0, 2),
    }
    .apply(&added, &mut ids)
    .unwrap();
    assert_eq!(after, before);

    let nested_added = Mutation::AddColumn {
        section: 1,
        parent: Some(0),
    }
    .apply(&before, &mut ids)
    .unwrap();
    let nested_after = Mutation::RemoveColumn {
        path: ColumnPath::nested(1, 0, 1),
    }
    .apply(&nested_added, &mut ids)
    .unwrap();
    assert_eq!(nested_after, before);
}

#[test]
fn test_add_then_remove_restores_elements() {
    let mut ids = IdGenerator::from_seed("t");
    let before = fixture(&mut ids);
    let col = ColumnPath::top(0, 0);

    let added = Mutation::AddElement {
        column: col,
        element_type: ElementType::Card,
    }
    .apply(&before, &mut ids)
    .unwrap();
    assert_eq!(added.sections[0].columns[0].elements.len(), 4);

    let after = Mutation::RemoveElement { path: col.element(3) }
        .apply(&added, &mut ids)
        .unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_remove_keeps_order_of_siblings() {
    let mut ids = IdGenerator::from_seed("t");
    let before = fixture(&mut ids);
    let col = ColumnPath::top(0, 0);

    let after = Mutation::RemoveElement { path: col.element(1) }
        .apply(&before, &mut ids)
        .unwrap();

    let kinds: Vec<ElementType> = after.sections[0].columns[0]
        .elements
        .iter()
        .map(|e| e.element_type())
        .collect();
    assert_eq!(kinds, vec![ElementType::Heading, ElementType::List]);
}

#[test]
fn test_update_shares_untouched_nodes() {
    let mut ids = IdGenerator::from_seed("t");
    let before = fixture(&mut ids);
    let path = ColumnPath::top(0, 0).element(0);

    let after = Mutation::UpdateElement {
        path,
        update: ElementUpdate::Value("Changed".to_string()),
    }
    .apply(&before, &mut ids)
    .unwrap();

    // The edited path is fresh
    assert!(!Arc::ptr_eq(&before.sections[0], &after.sections[0]));
    assert!(!Arc::ptr_eq(
        &before.sections[0].columns[0],
        &after.sections[0].columns[0]
    ));
    assert!(!Arc::ptr_eq(
        &before.sections[0].columns[0].elements[0],
        &after.sections[0].columns[0].elements[0]
    ));

    // Everything else is the same allocation
    assert!(Arc::ptr_eq(&before.sections[1], &after.sections[1]));
    assert!(Arc::ptr_eq(
        &before.sections[0].columns[1],
        &after.sections[0].columns[1]
    ));
    for i in 1..3 {
        assert!(Arc::ptr_eq(
            &before.sections[0].columns[0].elements[i],
            &after.sections[0].columns[0].elements[i]
        ));
    }

    // Sibling fields of the edited element are unchanged
    let old = &before.sections[0].columns[0].elements[0];
    let new = &after.sections[0].columns[0].elements[0];
    assert_eq!(new.value, "Changed");
    assert_eq!(new.id, old.id);
    assert_eq!(new.style, old.style);
    assert_eq!(new.kind, old.kind);
}

#[test]
fn test_failed_mutation_reports_range() {
    let mut ids = IdGenerator::from_seed("t");
    let doc = fixture(&mut ids);

    let err = Mutation::RemoveElement {
        path: ColumnPath::top(0, 1).element(0),
    }
    .apply(&doc, &mut ids)
    .unwrap_err();

    assert_eq!(
        err,
        MutationError::IndexOutOfRange {
            kind: "element",
            index: 0,
            len: 0
        }
    );
}

#[test]
fn test_background_and_container_fields() {
    let mut ids = IdGenerator::from_seed("t");
    let doc = fixture(&mut ids);

    let doc = apply_all_on(
        doc,
        &[
            Mutation::SetBackground {
                section: 0,
                field: BackgroundField::Kind(BackgroundKind::Gradient),
            },
            Mutation::SetBackground {
                section: 0,
                field: BackgroundField::GradientTo("#123456".to_string()),
            },
            Mutation::SetContainer {
                section: 0,
                field: ContainerField::PaddingSide(Side::Bottom, Some(0)),
            },
            Mutation::SetContainer {
                section: 0,
                field: ContainerField::MaxWidth("max-w-full".to_string()),
            },
        ],
        &mut ids,
    );

    let section = &doc.sections[0];
    assert_eq!(section.background.kind, BackgroundKind::Gradient);
    assert_eq!(section.background.gradient_to, "#123456");
    assert_eq!(section.background.color, "#ffffff");
    assert_eq!(section.container.padding_bottom, Some(0));
    assert_eq!(section.container.padding_top, None);
    assert_eq!(section.container.max_width, "max-w-full");
}

#[test]
fn test_column_fields() {
    let mut ids = IdGenerator::from_seed("t");
    let doc = fixture(&mut ids);
    let path = ColumnPath::top(0, 1);

    let doc = apply_all_on(
        doc,
        &[
            Mutation::SetColumnWidth {
                path,
                breakpoint: Breakpoint::Desktop,
                width: 12,
            },
            Mutation::SetColumnWidth {
                path,
                breakpoint: Breakpoint::Mobile,
                width: 1,
            },
            Mutation::SetColumnSpacing {
                path,
                key: "paddingLeft".parse::<SpacingKey>().unwrap(),
                value: Some("24px".to_string()),
            },
            Mutation::ToggleCard { path },
        ],
        &mut ids,
    );

    let column = &doc.sections[0].columns[1];
    assert_eq!(column.width, 12);
    assert_eq!(column.width_tablet, 12);
    assert_eq!(column.width_mobile, 1);
    assert_eq!(column.padding.left.as_deref(), Some("24px"));
    assert!(column.margin.is_unset());
    assert!(column.card);

    let toggled_back = Mutation::ToggleCard { path }.apply(&doc, &mut ids).unwrap();
    assert!(!toggled_back.sections[0].columns[1].card);
}

#[test]
fn test_element_style_and_variant_fields() {
    let mut ids = IdGenerator::from_seed("t");
    let doc = fixture(&mut ids);
    let heading = ColumnPath::top(0, 0).element(0);
    let image = ColumnPath::nested(1, 0, 0).element(0);

    let doc = apply_all_on(
        doc,
        &[
            Mutation::UpdateElement {
                path: heading,
                update: ElementUpdate::Align(Some(TextAlign::Center)),
            },
            Mutation::UpdateElement {
                path: image,
                update: ElementUpdate::AspectRatio(Some("16/9".to_string())),
            },
        ],
        &mut ids,
    );

    assert_eq!(doc.element(&heading).unwrap().style.align, Some(TextAlign::Center));
    match &doc.element(&image).unwrap().kind {
        ElementKind::Image(props) => assert_eq!(props.aspect_ratio.as_deref(), Some("16/9")),
        other => panic!("expected image, got {:?}", other),
    }

    let err = Mutation::UpdateElement {
        path: heading,
        update: ElementUpdate::ObjectFit(Some("contain".to_string())),
    }
    .apply(&doc, &mut ids)
    .unwrap_err();
    assert!(matches!(err, MutationError::FieldNotOnVariant { field: "objectFit", .. }));
}

#[test]
fn test_list_items() {
    let mut ids = IdGenerator::from_seed("t");
    let doc = fixture(&mut ids);
    let list = ColumnPath::top(0, 0).element(2);

    let doc = apply_all_on(
        doc,
        &[
            Mutation::UpdateListItem {
                path: list,
                item: 1,
                text: "Second".to_string(),
            },
            Mutation::RemoveListItem { path: list, item: 0 },
            Mutation::AppendListItem { path: list },
            Mutation::UpdateElement {
                path: list,
                update: ElementUpdate::ListKind(ListKind::Checklist),
            },
        ],
        &mut ids,
    );

    match &doc.element(&list).unwrap().kind {
        ElementKind::List(props) => {
            assert_eq!(props.items, vec!["Second", "Item 3", "New item"]);
            assert_eq!(props.list_kind, ListKind::Checklist);
        }
        other => panic!("expected list, got {:?}", other),
    }

    let err = Mutation::RemoveListItem { path: list, item: 3 }
        .apply(&doc, &mut ids)
        .unwrap_err();
    assert!(matches!(err, MutationError::IndexOutOfRange { kind: "list item", .. }));

    let err = Mutation::AppendListItem {
        path: ColumnPath::top(0, 0).element(0),
    }
    .apply(&doc, &mut ids)
    .unwrap_err();
    assert!(matches!(err, MutationError::FieldNotOnVariant { field: "items", .. }));
}

#[test]
fn test_moves() {
    let mut ids = IdGenerator::from_seed("t");
    let doc = fixture(&mut ids);
    let first_section = doc.sections[0].id.clone();
    let heading_id = doc.sections[0].columns[0].elements[0].id.clone();

    let doc = apply_all_on(
        doc,
        &[
            Mutation::MoveSection { section: 0, to: 1 },
            Mutation::MoveElement {
                path: ColumnPath::top(1, 0).element(0),
                to: 2,
            },
        ],
        &mut ids,
    );

    assert_eq!(doc.sections[1].id, first_section);
    assert_eq!(doc.sections[1].columns[0].elements[2].id, heading_id);
}

fn apply_all_on(doc: Document, mutations: &[Mutation], ids: &mut IdGenerator) -> Document {
    mutations
        .iter()
        .fold(doc, |doc, m| m.apply(&doc, ids).unwrap())
}
