use super::*;
use crate::document::xml::parse;

fn run(src: &str) -> ExportResult<(Document, Resolution)> {
    let mut doc = parse(src).unwrap();
    let res = resolve(&mut doc, &ResolveOptions::default())?;
    Ok((doc, res))
}

#[test]
fn titled_nodes_become_items_in_document_order() {
    let (_, res) = run(r#"<svg id="root">
        <g id="a1"><title>icon</title><rect id="r"/></g>
        <g id="b2"><title> logo </title></g>
    </svg>"#)
    .unwrap();

    let found: Vec<_> = res
        .items
        .iter()
        .map(|i| (i.id.as_str(), i.filename.as_str()))
        .collect();
    assert_eq!(found, [("a1", "icon"), ("b2", "logo")]);
    assert!(!res.needs_rewrite);
    assert!(!res.has_animation());
}

#[test]
fn explicit_filename_takes_precedence_over_title() {
    let (_, res) = run(r#"<svg>
        <g id="a1" data-export-filename="icons/home"><title>ignored</title></g>
    </svg>"#)
    .unwrap();
    assert_eq!(res.items.len(), 1);
    assert_eq!(res.items[0].filename, "icons/home");
}

#[test]
fn title_discovery_can_be_disabled() {
    let mut doc = parse(
        r#"<svg>
        <g id="a1"><title>icon</title></g>
        <g id="b2" data-export-filename="explicit"/>
    </svg>"#,
    )
    .unwrap();
    let opts = ResolveOptions {
        discover_titles: false,
        ..ResolveOptions::default()
    };
    let res = resolve(&mut doc, &opts).unwrap();
    assert_eq!(res.items.len(), 1);
    assert_eq!(res.items[0].id, "b2");
}

#[test]
fn marker_without_id_is_fatal() {
    let err = run(r#"<svg><g><title>orphan</title></g></svg>"#).unwrap_err();
    match err {
        ExportError::MissingId { name } => assert_eq!(name, "orphan"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn transparency_marker_patches_style_and_flags_rewrite() {
    let (doc, res) = run(r##"<svg>
        <rect id="r1" style="fill:#000;fill-opacity:1" data-export-transparent="true"/>
        <rect id="r2" style="fill:#fff" data-export-transparent="false"/>
    </svg>"##)
    .unwrap();
    assert!(res.needs_rewrite);

    let svg = doc.root_element().unwrap();
    let rects: Vec<_> = doc.child_elements(svg).map(|(id, _)| id).collect();
    assert_eq!(doc.attr(rects[0], "style"), Some("fill:#000;fill-opacity:0"));
    assert_eq!(doc.attr(rects[1], "style"), Some("fill:#fff"));
}

#[test]
fn transparency_is_idempotent_across_passes() {
    let (mut doc, _) = run(r##"<svg><rect id="r1" style="fill:#000;fill-opacity:1" data-export-transparent=""/></svg>"##)
        .unwrap();
    let svg = doc.root_element().unwrap();
    let (rect, _) = doc.child_elements(svg).next().unwrap();
    let first = doc.attr(rect, "style").unwrap().to_owned();

    let again = resolve(&mut doc, &ResolveOptions::default()).unwrap();
    assert!(again.needs_rewrite);
    assert_eq!(doc.attr(rect, "style"), Some(first.as_str()));
}

#[test]
fn frame_directives_are_scoped_to_the_animated_subtree() {
    let (_, res) = run(r#"<svg>
        <g id="anim" data-export-filename="spr_${frame}" data-export-frames="3">
            <rect id="f1" data-export-animate="x=${x}"/>
            <g><circle id="f2" data-export-animate="r=${frame}"/></g>
        </g>
        <rect id="outside" data-export-animate="x=1"/>
        <g id="still"><title>still</title></g>
    </svg>"#)
    .unwrap();

    assert_eq!(res.items.len(), 2);
    let anim = &res.items[0];
    assert_eq!(anim.frame_count, Some(3));
    assert_eq!(anim.frame_objects.len(), 2);
    assert!(res.items[1].frame_objects.is_empty());
    assert!(res.has_animation());
}

#[test]
fn animated_node_can_carry_its_own_directive() {
    let (_, res) = run(r#"<svg>
        <rect id="a" data-export-filename="a${frame}" data-export-frames="2" data-export-animate="width=${10 + frame}"/>
    </svg>"#)
    .unwrap();
    assert_eq!(res.items[0].frame_objects, vec![res.items[0].node]);
}

#[test]
fn nested_animated_item_keeps_outer_scope() {
    let (_, res) = run(r#"<svg>
        <g id="outer" data-export-filename="o${frame}" data-export-frames="2">
            <g id="inner" data-export-filename="i${frame}" data-export-frames="4">
                <rect id="f" data-export-animate="x=${x}"/>
            </g>
        </g>
    </svg>"#)
    .unwrap();
    assert_eq!(res.items.len(), 2);
    assert_eq!(res.items[0].frame_objects.len(), 1);
    assert!(res.items[1].frame_objects.is_empty());
    assert_eq!(res.items[1].frame_count, Some(4));
}

#[test]
fn invalid_frame_counts_are_rejected() {
    for bad in ["0", "-1", "two", ""] {
        let src = format!(
            r#"<svg><g id="a" data-export-filename="a" data-export-frames="{bad}"/></svg>"#
        );
        let err = run(&src).unwrap_err();
        assert!(
            matches!(err, ExportError::Annotation(_)),
            "frame count {bad:?} gave {err:?}"
        );
    }
}

#[test]
fn shared_export_name_is_exported_once_with_the_last_id() {
    let (_, res) = run(r#"<svg>
        <g id="a"><title>icon</title></g>
        <g id="m"><title>middle</title></g>
        <g id="b"><title>icon</title></g>
    </svg>"#)
    .unwrap();

    let found: Vec<_> = res
        .items
        .iter()
        .map(|i| (i.id.as_str(), i.filename.as_str()))
        .collect();
    assert_eq!(found, [("b", "icon"), ("m", "middle")]);
}
