//! Form data models
//!
//! Each form is a plain serde model of the dictionary its template draws.
//! Image fields hold asset names; before rendering they are rewritten to the
//! virtual paths the assets are mounted at.

pub mod fuel_card;
pub mod gate_pass;
pub mod samples;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::compiler::errors::EngineError;
use crate::templates::parse_template_uri;
use crate::world::asset_path;

pub use fuel_card::{
    Accountability, AccountableParty, Approver, ApprovalChain, BusinessExpense, CardReceipt,
    FuelCardForm, VehicleInfo,
};
pub use gate_pass::{GatePassForm, GatePassType, SignOff};

/// The forms this engine can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    FuelCard,
    GatePass,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::FuelCard, FormKind::GatePass];

    /// Template and URI name
    pub fn name(&self) -> &'static str {
        match self {
            FormKind::FuelCard => "fuel_card",
            FormKind::GatePass => "gate_pass",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::FuelCard => "Fuel Card Management Form",
            FormKind::GatePass => "Gate Pass",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormKind {
    type Err = EngineError;

    /// Accepts a form name or its `form://templates/` URI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let name = parse_template_uri(s).unwrap_or(s);
        match name.to_lowercase().replace('-', "_").as_str() {
            "fuel_card" | "fuel" => Ok(FormKind::FuelCard),
            "gate_pass" | "gate" => Ok(FormKind::GatePass),
            other => Err(EngineError::UnknownForm(other.to_string())),
        }
    }
}

/// Validated data for one form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormData {
    FuelCard(FuelCardForm),
    GatePass(GatePassForm),
}

impl FormData {
    /// Parse a JSON dictionary as data for `kind`
    pub fn from_json(kind: FormKind, value: serde_json::Value) -> Result<Self, EngineError> {
        let parsed = match kind {
            FormKind::FuelCard => serde_json::from_value(value).map(FormData::FuelCard),
            FormKind::GatePass => serde_json::from_value(value).map(FormData::GatePass),
        };
        parsed.map_err(|e| EngineError::InvalidFormData(format!("{}: {}", kind, e)))
    }

    pub fn kind(&self) -> FormKind {
        match self {
            FormData::FuelCard(_) => FormKind::FuelCard,
            FormData::GatePass(_) => FormKind::GatePass,
        }
    }

    /// Every non-empty image reference in the data, without duplicates
    pub fn asset_refs(&self) -> Vec<String> {
        let mut refs: Vec<String> = Vec::new();
        for image in self.images() {
            if !image.is_empty() && !refs.iter().any(|r| r == image) {
                refs.push(image.clone());
            }
        }
        refs
    }

    /// The data as the template sees it: image references point at `/assets/<name>`
    pub fn to_template_value(&self) -> Result<serde_json::Value, EngineError> {
        let mut resolved = self.clone();
        for image in resolved.images_mut() {
            if !image.is_empty() {
                *image = asset_path(image);
            }
        }
        Ok(serde_json::to_value(&resolved)?)
    }

    fn images(&self) -> Vec<&String> {
        match self {
            FormData::FuelCard(form) => form.signatures(),
            FormData::GatePass(form) => form.signatures(),
        }
    }

    fn images_mut(&mut self) -> Vec<&mut String> {
        match self {
            FormData::FuelCard(form) => form.signatures_mut(),
            FormData::GatePass(form) => form.signatures_mut(),
        }
    }
}

impl From<FuelCardForm> for FormData {
    fn from(form: FuelCardForm) -> Self {
        FormData::FuelCard(form)
    }
}

impl From<GatePassForm> for FormData {
    fn from(form: GatePassForm) -> Self {
        FormData::GatePass(form)
    }
}

/// Accept a string or a number for a text field
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Str(s) => s,
        Text::Int(n) => n.to_string(),
        Text::Float(n) => n.to_string(),
    })
}

/// Like [`text`], with `null` read as an empty string
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Text>::deserialize(deserializer)? {
        None => String::new(),
        Some(Text::Str(s)) => s,
        Some(Text::Int(n)) => n.to_string(),
        Some(Text::Float(n)) => n.to_string(),
    })
}
