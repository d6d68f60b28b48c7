use poll_tally::SlideError;
use poll_tally::slides::{ProjectorElement, SlideManifest, SlideRegistry};

fn manifest(slide: &str, identifiers: &[&str]) -> SlideManifest {
    SlideManifest {
        slide: slide.to_string(),
        path: slide.to_string(),
        load_children: format!("./slides/{}/slide.module#SlideModule", slide),
        verbose_name: slide.to_string(),
        element_identifiers: identifiers.iter().map(|id| id.to_string()).collect(),
        can_be_mapped_to_model: identifiers.contains(&"id"),
    }
}

fn registry() -> SlideRegistry {
    let mut registry = SlideRegistry::new();
    registry.register(manifest("motions/motion", &["name", "id"])).unwrap();
    registry.register(manifest("agenda/item-list", &["name", "only_main_items"])).unwrap();
    registry.register(manifest("core/clock", &["name"])).unwrap();
    registry
}

#[test]
fn duplicate_slides_are_rejected() {
    let mut registry = registry();
    let err = registry.register(manifest("core/clock", &["name"])).unwrap_err();
    assert!(matches!(err, SlideError::Duplicate(ref slide) if slide == "core/clock"));
    assert_eq!(registry.len(), 3);
}

#[test]
fn elements_resolve_to_their_manifest() {
    let registry = registry();
    let element = ProjectorElement::new("motions/motion").with_field("id", 7);

    let found = registry.manifest_for(&element).expect("motion slide registered");
    assert!(found.can_be_mapped_to_model);
    assert!(registry.manifest_for(&ProjectorElement::new("users/user")).is_none());
}

#[test]
fn identify_lists_identifying_fields_in_order() {
    let registry = registry();
    let element = ProjectorElement::new("motions/motion")
        .with_field("id", 7)
        .with_field("stable_note", "ignored");

    let identity = registry.identify(&element).unwrap();
    assert_eq!(
        identity,
        vec![
            ("name".to_string(), Some(serde_json::json!("motions/motion"))),
            ("id".to_string(), Some(serde_json::json!(7))),
        ]
    );
}

#[test]
fn same_element_compares_identifying_fields_only() {
    let registry = registry();
    let a = ProjectorElement::new("motions/motion").with_field("id", 7).with_field("mode", "a");
    let b = ProjectorElement::new("motions/motion").with_field("id", 7).with_field("mode", "b");
    let c = ProjectorElement::new("motions/motion").with_field("id", 8);

    assert!(registry.same_element(&a, &b));
    assert!(!registry.same_element(&a, &c));
    assert!(registry.same_element(&ProjectorElement::new("core/clock"), &ProjectorElement::new("core/clock")));
}

#[test]
fn unknown_slides_never_match() {
    let registry = registry();
    let element = ProjectorElement::new("users/user").with_field("id", 1);
    assert!(!registry.same_element(&element, &element.clone()));
}

#[test]
fn manifests_deserialize_from_camel_case() {
    let manifest: SlideManifest = serde_json::from_str(
        r#"{
            "slide": "agenda/current-list-of-speakers",
            "path": "agenda/current-list-of-speakers",
            "loadChildren": "./slides/agenda/current-list-of-speakers/module#Module",
            "verboseName": "Current list of speakers",
            "elementIdentifiers": ["name", "id"],
            "canBeMappedToModel": false
        }"#,
    )
    .unwrap();

    assert!(manifest.path_in_sync());
    let mut registry = SlideRegistry::new();
    registry.register(manifest).unwrap();
    assert!(registry.find("agenda/current-list-of-speakers").is_some());
}

#[test]
fn projector_elements_keep_extra_fields() {
    let element: ProjectorElement =
        serde_json::from_str(r#"{"name": "motions/motion", "id": 3, "stable": false}"#).unwrap();
    assert_eq!(element.stable, Some(false));
    assert_eq!(element.field("id"), Some(serde_json::json!(3)));
}
