//! Demo data for each form
//!
//! The signatures reference `signature.png` and `signature-2.png`, which
//! must be supplied by the asset source when these are rendered.

use serde_json::{json, Value};

use super::FormKind;

/// Sample data for `kind`
pub fn sample(kind: FormKind) -> Value {
    match kind {
        FormKind::FuelCard => fuel_card(),
        FormKind::GatePass => gate_pass(),
    }
}

pub fn fuel_card() -> Value {
    json!({
        "vehicle": {
            "vehicle_licence": "UAY 452L",
            "vehicle_model": "TOYOTA NOAH",
            "engine_capacity": "2000 CC",
            "fuel_card_no": "00012"
        },
        "business": {
            "date": "05.05.2023",
            "purpose": "Travel to Ndeeba, John Lugendo for engine work",
            "distance": "10.5",
            "rate": "5,000",
            "amount": "52,500",
            "amount_in_words": "Fifty Two Thousand Five Hundred Shillings Only",
            "amount_not_taken": ""
        },
        "approval": {
            "prepared": {
                "name": "Agness Kabatesi",
                "position": "Senior Administration Officer",
                "signature": "signature-2.png",
                "date": "02/06/2023"
            },
            "checked": {
                "name": "Sandra Ampumuza",
                "position": "Senior Accountant",
                "signature": "signature-2.png",
                "date": "02/06/2023"
            },
            "approved": {
                "name": "Arthur Tumusiime Asiimwe",
                "position": "Director Operational Support",
                "signature": "signature-2.png",
                "date": "02/06/2023"
            }
        },
        "receipt": {
            "name": "Agness Kabatesi",
            "signature": "signature-2.png",
            "card_number": "012",
            "benefactor": "Stephen Tipa Augustine",
            "benefactor_signature": "signature.png",
            "date": "02/06/2023"
        },
        "accountability": {
            "checked": {
                "name": "Agness Kabatesi",
                "signature": "signature-2.png",
                "date": "02/06/2023"
            },
            "verified": {
                "name": "Sandra Ampumuza",
                "signature": "signature-2.png",
                "date": "02/06/2023"
            }
        }
    })
}

pub fn gate_pass() -> Value {
    json!({
        "name": "Stephen Tipa Augustine",
        "position": "DEN",
        "department": "PD",
        "supervisor_name": "Fred Matovu",
        "supervisor_signature": "signature-2.png",
        "vehicle_licence": "UG 1234Z",
        "departure_time": "10:25",
        "return_time": "13:44",
        "type": 1,
        "reasons": [
            "Am going to pick my certificate from Makerere University",
            "I want to make tuition fee payment in the bank"
        ],
        "feedbacks": ["I got my certificate", "I completed my payment"],
        "employee_approval": {
            "signature": "signature.png",
            "date": "02/06/2023"
        },
        "feedback_approval": {
            "signature": "signature-2.png",
            "date": "02/06/2023"
        }
    })
}

/// Signature names the samples reference
pub const SAMPLE_SIGNATURES: [&str; 2] = ["signature.png", "signature-2.png"];
