//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::accounts::{LoginRequest, RegisterRequest, SessionResponse};
use crate::inbound::http::documents::{SignDocumentRequest, UpdateDocumentRequest};
use crate::inbound::http::schemas::{
    DocumentSchema, DocumentStatusSchema, DocumentWithSignatureSchema, ErrorCodeSchema,
    ErrorSchema, SignatureSchema, UserSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "papersign API",
        description = "Session-authenticated document listing, editing and signing.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_session,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::update_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::documents::sign_document,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorCodeSchema,
        ErrorSchema,
        UserSchema,
        DocumentStatusSchema,
        DocumentSchema,
        SignatureSchema,
        DocumentWithSignatureSchema,
        RegisterRequest,
        LoginRequest,
        SessionResponse,
        UpdateDocumentRequest,
        SignDocumentRequest,
    )),
    tags(
        (name = "accounts", description = "Registration and session management"),
        (name = "documents", description = "Document listing, editing and signing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} schema")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("User", &["id", "email", "displayName"])]
    #[case("Document", &["id", "name", "size", "mimeType", "fileKey", "status"])]
    #[case("DocumentWithSignature", &["id", "status", "signature"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let present = schema_fields(name);
        for field in fields {
            assert!(
                present.iter().any(|key| key == field),
                "{name} should have field {field}"
            );
        }
    }

    #[rstest]
    #[case("/api/register")]
    #[case("/api/auth/login")]
    #[case("/api/auth/logout")]
    #[case("/api/auth/session")]
    #[case("/api/documents")]
    #[case("/api/documents/{id}")]
    #[case("/api/documents/{id}/sign")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
