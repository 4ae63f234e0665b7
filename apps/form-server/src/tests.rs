//! Tests for the form server API
//!
//! - Property tests over form names and request formats
//! - HTTP endpoint tests through the full router using axum-test

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use form_engine::templates::list_templates;
    use form_engine::FormKind;

    use crate::api::{parse_format, parse_kind};
    use crate::error::ServerError;

    fn valid_form_name() -> impl Strategy<Value = String> {
        prop_oneof![Just("fuel_card".to_string()), Just("gate_pass".to_string())]
    }

    fn invalid_form_name() -> impl Strategy<Value = String> {
        "[a-z]{6,20}".prop_filter("Must not be a form", |s| {
            s.parse::<FormKind>().is_err()
        })
    }

    proptest! {
        /// Every form name is listed with a form:// URI
        #[test]
        fn valid_forms_are_listed(name in valid_form_name()) {
            let forms = list_templates();
            let form = forms.iter().find(|t| t.name == name);
            prop_assert!(form.is_some());
            let form = form.unwrap();
            prop_assert!(form.uri.starts_with("form://templates/"));
            prop_assert!(!form.required_inputs.is_empty());
        }

        /// Random names never resolve to a form
        #[test]
        fn invalid_forms_not_found(name in invalid_form_name()) {
            prop_assert!(!list_templates().iter().any(|t| t.name == name));
            prop_assert!(matches!(
                parse_kind(&name),
                Err(ServerError::FormNotFound(_))
            ));
        }

        /// Only pdf, svg and png are accepted, in any case
        #[test]
        fn format_parsing(format in "[a-zA-Z]{2,5}") {
            let parsed = parse_format(&format);
            let known = matches!(format.to_lowercase().as_str(), "pdf" | "svg" | "png");
            prop_assert_eq!(parsed.is_ok(), known);
        }
    }
}

#[cfg(test)]
mod http_endpoint_tests {
    //! HTTP endpoint integration tests using axum-test

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use form_engine::forms::samples;
    use form_engine::EngineConfig;
    use serde_json::{json, Value};

    use crate::{app, AppState};

    const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn create_test_server() -> TestServer {
        let config = EngineConfig {
            timeout_ms: 30_000,
            ..EngineConfig::default()
        };
        TestServer::new(app(AppState::new(config))).unwrap()
    }

    fn signatures() -> Value {
        json!({
            "signature.png": PIXEL_PNG,
            "signature-2.png": PIXEL_PNG,
        })
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "form-server");
    }

    #[tokio::test]
    async fn test_list_forms() {
        let server = create_test_server();
        let response = server.get("/api/forms").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["count"], 2);
        assert_eq!(json["forms"][0]["name"], "fuel_card");
    }

    #[tokio::test]
    async fn test_sample_matches_engine() {
        let server = create_test_server();
        let response = server.get("/api/forms/gate_pass/sample").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), samples::gate_pass());
    }

    #[tokio::test]
    async fn test_sample_unknown_form() {
        let server = create_test_server();
        let response = server.get("/api/forms/payslip/sample").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["code"], "FORM_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_render_gate_pass() {
        let server = create_test_server();
        let response = server
            .post("/api/forms/gate_pass/render")
            .json(&json!({
                "data": samples::gate_pass(),
                "assets": signatures(),
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["mime_type"], "application/pdf");
        assert_eq!(json["page_count"], 1);
        assert!(json["data"].as_str().unwrap().starts_with("JVBER")); // "%PDF"
    }

    #[tokio::test]
    async fn test_render_file_returns_bytes() {
        let server = create_test_server();
        let response = server
            .post("/api/forms/fuel_card/file")
            .json(&json!({
                "data": samples::fuel_card(),
                "format": "svg",
                "assets": signatures(),
            }))
            .await;
        response.assert_status_ok();

        assert_eq!(response.header("content-type"), "image/svg+xml");
        assert!(response.text().contains("<svg"));
    }

    #[tokio::test]
    async fn test_render_rejects_invalid_format() {
        let server = create_test_server();
        let response = server
            .post("/api/forms/gate_pass/render")
            .json(&json!({
                "data": samples::gate_pass(),
                "format": "docx",
            }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_render_rejects_invalid_data() {
        let server = create_test_server();
        let mut data = samples::gate_pass();
        data["type"] = json!(7);

        let response = server
            .post("/api/forms/gate_pass/render")
            .json(&json!({ "data": data, "assets": signatures() }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["code"], "INVALID_FORM_DATA");
    }

    #[tokio::test]
    async fn test_render_reports_missing_asset() {
        let server = create_test_server();
        let response = server
            .post("/api/forms/gate_pass/render")
            .json(&json!({ "data": samples::gate_pass() }))
            .await;
        response.assert_status_bad_request();

        let json = response.json::<Value>();
        assert_eq!(json["code"], "ASSET_NOT_FOUND");
        assert!(json["error"].as_str().unwrap().contains(".png"));
    }

    #[tokio::test]
    async fn test_render_rejects_bad_base64() {
        let server = create_test_server();
        let response = server
            .post("/api/forms/gate_pass/render")
            .json(&json!({
                "data": samples::gate_pass(),
                "assets": { "signature.png": "***" },
            }))
            .await;
        response.assert_status_bad_request();
    }
}
