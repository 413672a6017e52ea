//! API Router with Swagger UI

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse};
use super::middleware::{auth_middleware, AuthState};
use super::modules::{
    auth, customers, gates, health, parking, reports, subscriptions, tariffs, users,
};
use super::state::AppState;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        auth::change_password,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::assign_administrator,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::create_admin,
        users::update_user,
        users::delete_user,
        // Gates
        gates::list_gates,
        gates::get_gate,
        gates::create_gate,
        gates::update_gate,
        gates::delete_gate,
        // Tariffs
        tariffs::list_tariffs,
        tariffs::get_tariff,
        tariffs::create_tariff,
        tariffs::update_tariff,
        tariffs::delete_tariff,
        tariffs::match_tariffs,
        tariffs::quote,
        tariffs::list_overlaps,
        // Subscriptions
        subscriptions::list_subscriptions,
        subscriptions::get_subscription,
        subscriptions::create_subscription,
        subscriptions::update_subscription,
        subscriptions::delete_subscription,
        subscriptions::find_active,
        // Parking
        parking::check_in,
        parking::check_out,
        parking::list_sessions,
        parking::open_sessions,
        parking::get_session,
        parking::delete_session,
        // Reports
        reports::revenue,
        reports::occupancy,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<users::UserDto>,
            PaginatedResponse<customers::CustomerDto>,
            PaginatedResponse<subscriptions::SubscriptionDto>,
            PaginatedResponse<parking::ParkingLogDto>,
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::ChangePasswordRequest,
            // Customers
            customers::CustomerDto,
            customers::CreateCustomerRequest,
            customers::UpdateCustomerRequest,
            customers::AssignAdministratorRequest,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            users::CreateAdminRequest,
            users::UpdateUserRequest,
            // Gates
            gates::CameraDto,
            gates::GateDto,
            gates::CreateGateRequest,
            gates::UpdateGateRequest,
            // Tariffs
            tariffs::TariffDto,
            tariffs::CreateTariffRequest,
            tariffs::UpdateTariffRequest,
            tariffs::TariffQuoteDto,
            tariffs::TariffOverlapDto,
            // Subscriptions
            subscriptions::SubscriptionDto,
            subscriptions::CreateSubscriptionRequest,
            subscriptions::UpdateSubscriptionRequest,
            // Parking
            parking::ParkingLogDto,
            parking::CheckInRequest,
            parking::CheckOutRequest,
            parking::CheckOutReceiptDto,
            // Reports
            reports::RevenueReportDto,
            reports::OccupancyDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Login (JWT), profile, password change"),
        (name = "Customers", description = "Tenant accounts, superusers only"),
        (name = "Users", description = "Staff accounts of a tenant"),
        (name = "Gates", description = "Entry and exit points with camera metadata"),
        (name = "Tariffs", description = "Duration buckets and price quotes"),
        (name = "Subscriptions", description = "Plate-number season passes"),
        (name = "Parking", description = "Check-in, check-out and the parking log"),
        (name = "Reports", description = "Revenue and occupancy"),
    ),
    info(
        title = "EPMS Parking API",
        version = "1.0.0",
        description = "REST API for multi-tenant parking lot management",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/auth/login", post(auth::login));

    let auth_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password));

    let customer_routes = Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/{customer_id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route(
            "/{customer_id}/administrator",
            put(customers::assign_administrator),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/admins", post(users::create_admin))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let gate_routes = Router::new()
        .route("/", get(gates::list_gates).post(gates::create_gate))
        .route(
            "/{gate_id}",
            get(gates::get_gate)
                .put(gates::update_gate)
                .delete(gates::delete_gate),
        );

    let tariff_routes = Router::new()
        .route("/", get(tariffs::list_tariffs).post(tariffs::create_tariff))
        .route("/match", get(tariffs::match_tariffs))
        .route("/quote", get(tariffs::quote))
        .route("/overlaps", get(tariffs::list_overlaps))
        .route(
            "/{tariff_id}",
            get(tariffs::get_tariff)
                .put(tariffs::update_tariff)
                .delete(tariffs::delete_tariff),
        );

    let subscription_routes = Router::new()
        .route(
            "/",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route("/active", get(subscriptions::find_active))
        .route(
            "/{subscription_id}",
            get(subscriptions::get_subscription)
                .put(subscriptions::update_subscription)
                .delete(subscriptions::delete_subscription),
        );

    let parking_routes = Router::new()
        .route("/check-in", post(parking::check_in))
        .route("/sessions", get(parking::list_sessions))
        .route("/open", get(parking::open_sessions))
        .route(
            "/{ticket_id}",
            get(parking::get_session).delete(parking::delete_session),
        )
        .route("/{ticket_id}/check-out", post(parking::check_out));

    let report_routes = Router::new()
        .route("/revenue", get(reports::revenue))
        .route("/occupancy", get(reports::occupancy));

    let protected_routes = Router::new()
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/customers", customer_routes)
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/gates", gate_routes)
        .nest("/api/v1/tariffs", tariff_routes)
        .nest("/api/v1/subscriptions", subscription_routes)
        .nest("/api/v1/parking", parking_routes)
        .nest("/api/v1/reports", report_routes)
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
