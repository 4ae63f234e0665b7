//! Staff gate pass data

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{optional_text, text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePassForm {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub position: String,
    #[serde(deserialize_with = "text")]
    pub department: String,
    #[serde(deserialize_with = "text")]
    pub supervisor_name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub supervisor_signature: String,
    /// Only required for official duty
    #[serde(default, deserialize_with = "optional_text")]
    pub vehicle_licence: String,
    #[serde(deserialize_with = "text")]
    pub departure_time: String,
    #[serde(deserialize_with = "text")]
    pub return_time: String,
    #[serde(rename = "type")]
    pub pass_type: GatePassType,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub feedbacks: Vec<String>,
    pub employee_approval: SignOff,
    pub feedback_approval: SignOff,
}

/// A signature and the date it was given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignOff {
    #[serde(default, deserialize_with = "optional_text")]
    pub signature: String,
    #[serde(deserialize_with = "text")]
    pub date: String,
}

/// Why the staff member is leaving; serialized as 1, 2 or 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GatePassType {
    Official,
    Personal,
    Lunchtime,
}

impl GatePassType {
    pub fn label(&self) -> &'static str {
        match self {
            GatePassType::Official => "OFFICIAL",
            GatePassType::Personal => "PERSONAL",
            GatePassType::Lunchtime => "LUNCHTIME",
        }
    }
}

impl TryFrom<u8> for GatePassType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(GatePassType::Official),
            2 => Ok(GatePassType::Personal),
            3 => Ok(GatePassType::Lunchtime),
            other => Err(format!(
                "gate pass type must be 1 (official), 2 (personal) or 3 (lunchtime), got {}",
                other
            )),
        }
    }
}

impl From<GatePassType> for u8 {
    fn from(kind: GatePassType) -> u8 {
        match kind {
            GatePassType::Official => 1,
            GatePassType::Personal => 2,
            GatePassType::Lunchtime => 3,
        }
    }
}

impl fmt::Display for GatePassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl GatePassForm {
    pub(crate) fn signatures(&self) -> Vec<&String> {
        vec![
            &self.supervisor_signature,
            &self.employee_approval.signature,
            &self.feedback_approval.signature,
        ]
    }

    pub(crate) fn signatures_mut(&mut self) -> Vec<&mut String> {
        vec![
            &mut self.supervisor_signature,
            &mut self.employee_approval.signature,
            &mut self.feedback_approval.signature,
        ]
    }
}
