use crate::error::SlideError;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    static ref SLIDE_IDENTIFIER: Regex = Regex::new(r"^[a-z][a-z0-9_-]*/[a-z][a-z0-9_-]*$").unwrap();
}

/// An element placed on a projector. `name` selects the slide; the remaining
/// fields are matched against the slide's element identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectorElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ProjectorElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stable: None,
            fields: serde_json::Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Field by name, `name` itself included.
    pub fn field(&self, key: &str) -> Option<serde_json::Value> {
        if key == "name" {
            Some(serde_json::Value::String(self.name.clone()))
        } else {
            self.fields.get(key).cloned()
        }
    }
}

/// Describes a pluggable slide. Mirrors a router entry, so `slide` and `path`
/// are expected to be kept in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideManifest {
    pub slide: String,
    pub path: String,
    pub load_children: String,
    pub verbose_name: String,
    pub element_identifiers: Vec<String>,
    pub can_be_mapped_to_model: bool,
}

impl SlideManifest {
    pub fn path_in_sync(&self) -> bool {
        self.path.trim_start_matches('/') == self.slide
    }
}

/// A slide option that is either fixed or decided per element.
#[derive(Clone, Copy)]
pub enum SlideFlag {
    Fixed(bool),
    PerElement(fn(&ProjectorElement) -> bool),
}

impl SlideFlag {
    pub fn resolve(&self, element: &ProjectorElement) -> bool {
        match self {
            SlideFlag::Fixed(value) => *value,
            SlideFlag::PerElement(predicate) => predicate(element),
        }
    }
}

impl std::fmt::Debug for SlideFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlideFlag::Fixed(value) => write!(f, "Fixed({})", value),
            SlideFlag::PerElement(_) => write!(f, "PerElement(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SlideDynamicConfiguration {
    pub scrollable: SlideFlag,
    pub scaleable: SlideFlag,
}

impl SlideDynamicConfiguration {
    pub fn is_scrollable(&self, element: &ProjectorElement) -> bool {
        self.scrollable.resolve(element)
    }

    pub fn is_scaleable(&self, element: &ProjectorElement) -> bool {
        self.scaleable.resolve(element)
    }
}

#[derive(Debug, Default)]
pub struct SlideRegistry {
    manifests: HashMap<String, SlideManifest>,
}

impl SlideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, manifest: SlideManifest) -> Result<(), SlideError> {
        if !SLIDE_IDENTIFIER.is_match(&manifest.slide) {
            return Err(SlideError::InvalidIdentifier(manifest.slide));
        }
        if self.manifests.contains_key(&manifest.slide) {
            return Err(SlideError::Duplicate(manifest.slide));
        }
        if !manifest.path_in_sync() {
            warn!("Slide {} is registered under diverging path {}", manifest.slide, manifest.path);
        }

        debug!("Registered slide {}", manifest.slide);
        self.manifests.insert(manifest.slide.clone(), manifest);
        Ok(())
    }

    pub fn find(&self, slide: &str) -> Option<&SlideManifest> {
        self.manifests.get(slide)
    }

    pub fn manifest_for(&self, element: &ProjectorElement) -> Option<&SlideManifest> {
        self.find(&element.name)
    }

    /// Values of the fields that identify `element`, in manifest order.
    pub fn identify(&self, element: &ProjectorElement) -> Option<Vec<(String, Option<serde_json::Value>)>> {
        let manifest = self.manifest_for(element)?;
        Some(
            manifest
                .element_identifiers
                .iter()
                .map(|key| (key.clone(), element.field(key)))
                .collect(),
        )
    }

    /// Whether two elements show the same thing on the projector.
    pub fn same_element(&self, a: &ProjectorElement, b: &ProjectorElement) -> bool {
        if a.name != b.name {
            return false;
        }
        match (self.identify(a), self.identify(b)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion_slide() -> SlideManifest {
        SlideManifest {
            slide: "motions/motion".to_string(),
            path: "motions/motion".to_string(),
            load_children: "./slides/motions/motion/motion-slide.module#MotionSlideModule".to_string(),
            verbose_name: "Motion".to_string(),
            element_identifiers: vec!["name".to_string(), "id".to_string()],
            can_be_mapped_to_model: true,
        }
    }

    #[test]
    fn rejects_malformed_identifiers() {
        let mut registry = SlideRegistry::new();
        let manifest = SlideManifest {
            slide: "Motions Motion".to_string(),
            ..motion_slide()
        };
        assert!(matches!(registry.register(manifest), Err(SlideError::InvalidIdentifier(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn dashes_are_allowed_on_both_sides() {
        let mut registry = SlideRegistry::new();
        let manifest = SlideManifest {
            slide: "motion-blocks/motion-block".to_string(),
            path: "motion-blocks/motion-block".to_string(),
            ..motion_slide()
        };
        registry.register(manifest).unwrap();
        assert!(registry.find("motion-blocks/motion-block").is_some());
    }

    #[test]
    fn out_of_sync_path_is_still_registered() {
        let mut registry = SlideRegistry::new();
        let manifest = SlideManifest {
            path: "motions/other".to_string(),
            ..motion_slide()
        };
        assert!(!manifest.path_in_sync());
        registry.register(manifest).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn per_element_flags() {
        fn has_id(element: &ProjectorElement) -> bool {
            element.fields.contains_key("id")
        }
        let config = SlideDynamicConfiguration {
            scrollable: SlideFlag::Fixed(true),
            scaleable: SlideFlag::PerElement(has_id),
        };
        let element = ProjectorElement::new("core/clock");
        assert!(config.is_scrollable(&element));
        assert!(!config.is_scaleable(&element));
        assert!(config.is_scaleable(&element.with_field("id", 3)));
    }
}
