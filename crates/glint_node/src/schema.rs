//! Node schema and registration
//!
//! Describes the node's inputs and outputs in a form the host can render as a
//! node widget, and maps class names to display names.

use crate::params::{
    TextOverlayParams, FONT_SIZE_RANGE, OPACITY_RANGE, POSITION_RANGE, ROTATION_RANGE,
    SHADOW_RANGE,
};
use crate::{NodeError, Result, NODE_CATEGORY, NODE_FUNCTION};
use glint_text::CUSTOM_FONT_FAMILY;
use serde::Serialize;
use std::collections::BTreeMap;

/// Widget type and constraints of one input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKind {
    Image,
    String {
        multiline: bool,
        default: String,
    },
    Int {
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    Float {
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    /// One of a fixed list of values
    Choice { options: Vec<String> },
}

/// Show an input only while another input has a given value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleIf {
    pub input: String,
    pub equals: String,
}

/// One named node input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<VisibleIf>,
}

impl InputSpec {
    pub fn new(name: &str, kind: InputKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            visible_if: None,
        }
    }

    fn int(name: &str, default: u32, (min, max): (u32, u32), step: i64) -> Self {
        Self::new(
            name,
            InputKind::Int {
                default: default.into(),
                min: min.into(),
                max: max.into(),
                step,
            },
        )
    }

    fn string(name: &str, multiline: bool, default: &str) -> Self {
        Self::new(
            name,
            InputKind::String {
                multiline,
                default: default.to_string(),
            },
        )
    }

    pub fn visible_if(mut self, input: &str, equals: &str) -> Self {
        self.visible_if = Some(VisibleIf {
            input: input.to_string(),
            equals: equals.to_string(),
        });
        self
    }
}

/// Inputs, outputs and entry point of a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSchema {
    pub required: Vec<InputSpec>,
    pub optional: Vec<InputSpec>,
    pub return_types: Vec<String>,
    pub function: String,
    pub category: String,
}

impl NodeSchema {
    /// Schema of the text overlay node with the given font family choices
    pub fn text_overlay(font_families: Vec<String>) -> Self {
        let d = TextOverlayParams::default();

        let required = vec![
            InputSpec::new("image", InputKind::Image),
            InputSpec::string("text", true, &d.text),
            InputSpec::int("x", d.x, POSITION_RANGE, 1),
            InputSpec::int("y", d.y, POSITION_RANGE, 1),
            InputSpec::int("font_size", d.font_size, FONT_SIZE_RANGE, 1),
            InputSpec::new(
                "font_family",
                InputKind::Choice {
                    options: font_families,
                },
            ),
            InputSpec::string("font_color", false, &d.font_color),
            InputSpec::int("font_shadow_x", d.font_shadow_x, SHADOW_RANGE, 1),
            InputSpec::int("font_shadow_y", d.font_shadow_y, SHADOW_RANGE, 1),
            InputSpec::string("shadow_color", false, &d.shadow_color),
            InputSpec::new(
                "opacity",
                InputKind::Float {
                    default: d.opacity.into(),
                    min: OPACITY_RANGE.0.into(),
                    max: OPACITY_RANGE.1.into(),
                    step: 0.1,
                },
            ),
            InputSpec::int("rotation", d.rotation, ROTATION_RANGE, 5),
        ];

        let optional = vec![InputSpec::string("custom_font_path", false, "")
            .visible_if("font_family", CUSTOM_FONT_FAMILY)];

        Self {
            required,
            optional,
            return_types: vec!["IMAGE".to_string()],
            function: NODE_FUNCTION.to_string(),
            category: NODE_CATEGORY.to_string(),
        }
    }

    /// Look up an input by name
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.required
            .iter()
            .chain(&self.optional)
            .find(|spec| spec.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NodeError::Config(format!("Failed to serialize schema: {e}")))
    }
}

/// A registered node class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEntry {
    pub display_name: String,
    pub schema: NodeSchema,
}

/// Class name -> node mapping handed to the host
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, NodeEntry>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node class; a second registration replaces the first
    pub fn register(&mut self, class: &str, display_name: &str, schema: NodeSchema) -> &mut Self {
        tracing::debug!("Registering node class {} ({})", class, display_name);
        self.nodes.insert(
            class.to_string(),
            NodeEntry {
                display_name: display_name.to_string(),
                schema,
            },
        );
        self
    }

    pub fn display_name(&self, class: &str) -> Option<&str> {
        self.nodes.get(class).map(|e| e.display_name.as_str())
    }

    pub fn schema(&self, class: &str) -> Option<&NodeSchema> {
        self.nodes.get(class).map(|e| &e.schema)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NodeError::Config(format!("Failed to serialize registry: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NODE_CLASS, NODE_DISPLAY_NAME};

    fn schema() -> NodeSchema {
        NodeSchema::text_overlay(vec!["Custom".to_string(), "Roboto".to_string()])
    }

    #[test]
    fn test_text_overlay_inputs() {
        let schema = schema();
        let names: Vec<&str> = schema.required.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "image",
                "text",
                "x",
                "y",
                "font_size",
                "font_family",
                "font_color",
                "font_shadow_x",
                "font_shadow_y",
                "shadow_color",
                "opacity",
                "rotation"
            ]
        );
        assert_eq!(schema.return_types, vec!["IMAGE"]);
        assert_eq!(schema.function, "add_text");
        assert_eq!(schema.category, "AI_Boy");
    }

    #[test]
    fn test_input_ranges() {
        let schema = schema();
        assert_eq!(
            schema.input("font_size").unwrap().kind,
            InputKind::Int {
                default: 38,
                min: 0,
                max: 1000,
                step: 1
            }
        );
        assert_eq!(
            schema.input("rotation").unwrap().kind,
            InputKind::Int {
                default: 0,
                min: 0,
                max: 360,
                step: 5
            }
        );
        assert_eq!(
            schema.input("font_family").unwrap().kind,
            InputKind::Choice {
                options: vec!["Custom".to_string(), "Roboto".to_string()]
            }
        );
    }

    #[test]
    fn test_custom_font_path_visibility() {
        let schema = schema();
        let spec = schema.input("custom_font_path").unwrap();
        assert_eq!(
            spec.visible_if,
            Some(VisibleIf {
                input: "font_family".to_string(),
                equals: "Custom".to_string()
            })
        );
        assert!(schema.input("nope").is_none());
    }

    #[test]
    fn test_schema_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&schema().to_json().unwrap()).unwrap();
        let text = &json["required"][1];
        assert_eq!(text["name"], "text");
        assert_eq!(text["type"], "STRING");
        assert_eq!(text["multiline"], true);
        assert_eq!(text["default"], "A cute puppy");
        assert!(text.get("visible_if").is_none());
        assert_eq!(json["optional"][0]["visible_if"]["equals"], "Custom");
    }

    #[test]
    fn test_registry() {
        let mut registry = NodeRegistry::new();
        assert!(registry.is_empty());

        registry.register(NODE_CLASS, NODE_DISPLAY_NAME, schema());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.display_name("AddText"), Some("AddTextToImage"));
        assert!(registry.schema("AddText").is_some());
        assert_eq!(registry.class_names().collect::<Vec<_>>(), vec!["AddText"]);
        assert_eq!(registry.display_name("Other"), None);

        let json: serde_json::Value =
            serde_json::from_str(&registry.to_json().unwrap()).unwrap();
        assert_eq!(json["nodes"]["AddText"]["display_name"], "AddTextToImage");
    }
}
