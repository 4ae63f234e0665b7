//! Embedded template loader
//!
//! Form templates live in `templates/*.typ` and are embedded in the binary
//! at compile time.

/// Fuel card management form - loaded from templates/fuel_card.typ
const FUEL_CARD_TEMPLATE: &str = include_str!("../../templates/fuel_card.typ");

/// Staff gate pass - loaded from templates/gate_pass.typ
const GATE_PASS_TEMPLATE: &str = include_str!("../../templates/gate_pass.typ");

/// Get an embedded template by name
pub fn get_embedded_template(name: &str) -> Option<&'static str> {
    match name {
        "fuel_card" => Some(FUEL_CARD_TEMPLATE),
        "gate_pass" => Some(GATE_PASS_TEMPLATE),
        _ => None,
    }
}

/// List all available embedded template names
pub fn list_embedded_templates() -> Vec<&'static str> {
    vec!["fuel_card", "gate_pass"]
}
