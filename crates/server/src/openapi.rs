use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CompanyDoc {
    pub id: Uuid,
    pub name: String,
    /// MASS, DREAM IT, OPEN DREAM or CORE
    #[schema(example = "MASS")]
    pub category: String,
}

#[derive(ToSchema)]
pub struct CompanyInputDoc {
    pub name: String,
    #[schema(example = "CORE")]
    pub category: String,
}

#[derive(ToSchema)]
pub struct CompanyRefDoc { pub id: Uuid }

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: Uuid,
    #[schema(example = "Monika Jaiswal")]
    pub name: String,
    #[schema(example = "6388768118")]
    pub phone: String,
    #[schema(example = "02/07/2000")]
    pub dob: String,
    #[schema(example = "ECE")]
    pub branch: String,
    /// Present on single reads and on lists with `includeCompany=true`
    pub company: Option<CompanyDoc>,
    #[schema(example = "ACCEPTED")]
    pub status: String,
}

#[derive(ToSchema)]
pub struct StudentInputDoc {
    pub name: String,
    pub phone: String,
    /// DD/MM/YYYY
    pub dob: String,
    pub branch: String,
    /// Only `id` is read
    pub company: CompanyRefDoc,
    pub status: String,
}

struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-KEY"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::get,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CompanyDoc,
            CompanyInputDoc,
            CompanyRefDoc,
            StudentDoc,
            StudentInputDoc,
        )
    ),
    modifiers(&ApiKeyAddon),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "students")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }
