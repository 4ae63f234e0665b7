//! Fuel card management form data

use serde::{Deserialize, Serialize};

use super::{optional_text, text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCardForm {
    pub vehicle: VehicleInfo,
    pub business: BusinessExpense,
    pub approval: ApprovalChain,
    pub receipt: CardReceipt,
    pub accountability: Accountability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    #[serde(deserialize_with = "text")]
    pub vehicle_licence: String,
    #[serde(deserialize_with = "text")]
    pub vehicle_model: String,
    #[serde(deserialize_with = "text")]
    pub engine_capacity: String,
    #[serde(deserialize_with = "text")]
    pub fuel_card_no: String,
}

/// The single business trip the card is issued for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessExpense {
    #[serde(deserialize_with = "text")]
    pub date: String,
    #[serde(deserialize_with = "text")]
    pub purpose: String,
    /// Kilometres
    #[serde(deserialize_with = "text")]
    pub distance: String,
    #[serde(deserialize_with = "text")]
    pub rate: String,
    #[serde(deserialize_with = "text")]
    pub amount: String,
    #[serde(deserialize_with = "text")]
    pub amount_in_words: String,
    /// Usually blank until the card is returned
    #[serde(default, deserialize_with = "optional_text")]
    pub amount_not_taken: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalChain {
    pub prepared: Approver,
    pub checked: Approver,
    pub approved: Approver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approver {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub position: String,
    /// Image asset name; empty leaves the signature space blank
    #[serde(default, deserialize_with = "optional_text")]
    pub signature: String,
    #[serde(deserialize_with = "text")]
    pub date: String,
}

/// Acknowledgement that the user received the card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardReceipt {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub signature: String,
    #[serde(deserialize_with = "text")]
    pub card_number: String,
    /// Person handing over the card
    #[serde(deserialize_with = "text")]
    pub benefactor: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub benefactor_signature: String,
    #[serde(deserialize_with = "text")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accountability {
    pub checked: AccountableParty,
    pub verified: AccountableParty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountableParty {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub signature: String,
    #[serde(deserialize_with = "text")]
    pub date: String,
}

impl FuelCardForm {
    pub(crate) fn signatures(&self) -> Vec<&String> {
        vec![
            &self.approval.prepared.signature,
            &self.approval.checked.signature,
            &self.approval.approved.signature,
            &self.receipt.signature,
            &self.receipt.benefactor_signature,
            &self.accountability.checked.signature,
            &self.accountability.verified.signature,
        ]
    }

    pub(crate) fn signatures_mut(&mut self) -> Vec<&mut String> {
        vec![
            &mut self.approval.prepared.signature,
            &mut self.approval.checked.signature,
            &mut self.approval.approved.signature,
            &mut self.receipt.signature,
            &mut self.receipt.benefactor_signature,
            &mut self.accountability.checked.signature,
            &mut self.accountability.verified.signature,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::samples;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_sample() {
        let form: FuelCardForm = serde_json::from_value(samples::fuel_card()).unwrap();
        assert_eq!(form.vehicle.vehicle_licence, "UAY 452L");
        assert_eq!(form.business.amount, "52,500");
        assert_eq!(form.approval.approved.position, "Director Operational Support");
        assert_eq!(form.receipt.benefactor_signature, "signature.png");
    }

    #[test]
    fn test_missing_key_is_named() {
        let mut value = samples::fuel_card();
        value["vehicle"]
            .as_object_mut()
            .unwrap()
            .remove("fuel_card_no");

        let err = serde_json::from_value::<FuelCardForm>(value).unwrap_err();
        assert!(err.to_string().contains("fuel_card_no"), "{}", err);
    }

    #[test]
    fn test_optional_fields_default_to_blank() {
        let mut value = samples::fuel_card();
        value["business"].as_object_mut().unwrap().remove("amount_not_taken");
        value["receipt"]["signature"] = json!(null);

        let form: FuelCardForm = serde_json::from_value(value).unwrap();
        assert_eq!(form.business.amount_not_taken, "");
        assert_eq!(form.receipt.signature, "");
    }

    #[test]
    fn test_every_signature_is_listed() {
        let form: FuelCardForm = serde_json::from_value(samples::fuel_card()).unwrap();
        assert_eq!(form.signatures().len(), 7);
    }

    #[test]
    fn test_serializes_back_to_same_shape() {
        let form: FuelCardForm = serde_json::from_value(samples::fuel_card()).unwrap();
        assert_eq!(serde_json::to_value(&form).unwrap(), samples::fuel_card());
    }
}
