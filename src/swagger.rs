use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::draw_categories::DrawSchedule;
use crate::entities::draws::{DrawStatus, PrizeBreakdown, PrizeTier};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::draws::index,
        handlers::draws::show,
        handlers::categories::index,
        handlers::admin::list_draws,
        handlers::admin::create_draw,
        handlers::admin::show_draw,
        handlers::admin::update_draw,
        handlers::admin::delete_draw,
        handlers::admin::list_categories,
        handlers::admin::create_category,
        handlers::admin::show_category,
        handlers::admin::update_category,
        handlers::admin::delete_category,
    ),
    components(
        schemas(
            DrawStatus,
            DrawSchedule,
            PrizeTier,
            PrizeBreakdown,
            DrawResponse,
            DrawRequest,
            DrawListQuery,
            DrawIndexResponse,
            DrawDetailResponse,
            CategoryResponse,
            CategoryOption,
            CategoryRequest,
            LoginRequest,
            RefreshTokenRequest,
            AuthResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Admin authentication API"),
        (name = "draws", description = "Public draw results API"),
        (name = "categories", description = "Public draw categories API"),
        (name = "admin", description = "Admin management API"),
    ),
    info(
        title = "LottoHub Backend API",
        version = "1.0.0",
        description = "Lottery draw results publishing REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
