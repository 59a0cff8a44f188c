use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub users: usize, pub complaints: usize, pub resolved: usize }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String }

#[derive(ToSchema)]
pub struct ComplaintRequest { pub title: String, pub summary: String, pub severity: i32 }

#[derive(ToSchema)]
pub struct ComplaintDoc {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub severity: i32,
    pub resolved: bool,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: String,
    pub secret_code: String,
    pub name: String,
    pub email: String,
    pub complaints: Vec<ComplaintDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::complaints::submit,
        crate::routes::complaints::list_for_user,
        crate::routes::complaints::list_for_admin,
        crate::routes::complaints::view,
        crate::routes::complaints::resolve,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            ComplaintRequest,
            ComplaintDoc,
            UserDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "complaints"),
        (name = "admin")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/register",
            "/login",
            "/submitComplaint",
            "/getAllComplaintsForUser",
            "/getAllComplaintsForAdmin",
            "/viewComplaint",
            "/resolveComplaint",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
