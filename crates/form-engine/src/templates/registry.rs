//! Template registry and metadata

use super::embedded;
use crate::compiler::errors::EngineError;
use serde::{Deserialize, Serialize};

/// URI scheme prefix for embedded templates
pub const TEMPLATE_URI_PREFIX: &str = "form://templates/";

/// Information about an available form template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Template name (used in URIs and as the form kind)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Full URI for this template
    pub uri: String,
    /// Page format
    pub page: String,
    /// Required top-level data keys
    pub required_inputs: Vec<String>,
    /// Optional top-level data keys
    pub optional_inputs: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// List all available templates
pub fn list_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            name: "fuel_card".to_string(),
            description: "Fuel card management form: vehicle, business trip, approvals, \
                          user agreement, card receipt and accountability"
                .to_string(),
            uri: format!("{}fuel_card", TEMPLATE_URI_PREFIX),
            page: "A4 landscape".to_string(),
            required_inputs: strings(&[
                "vehicle",
                "business",
                "approval",
                "receipt",
                "accountability",
            ]),
            optional_inputs: vec![],
        },
        TemplateInfo {
            name: "gate_pass".to_string(),
            description: "Staff gate pass for leaving the duty station during working hours"
                .to_string(),
            uri: format!("{}gate_pass", TEMPLATE_URI_PREFIX),
            page: "A4 portrait".to_string(),
            required_inputs: strings(&[
                "name",
                "position",
                "department",
                "supervisor_name",
                "departure_time",
                "return_time",
                "type",
                "employee_approval",
                "feedback_approval",
            ]),
            optional_inputs: strings(&[
                "supervisor_signature",
                "vehicle_licence",
                "reasons",
                "feedbacks",
            ]),
        },
    ]
}

/// Get the source code for a template by name
pub fn get_template_source(name: &str) -> Result<&'static str, EngineError> {
    embedded::get_embedded_template(name)
        .ok_or_else(|| EngineError::TemplateNotFound(name.to_string()))
}

/// Parse a template URI and return the template name
pub fn parse_template_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(TEMPLATE_URI_PREFIX)
}
