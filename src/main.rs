// src/main.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é adequado aqui: sem configuração válida a aplicação não sobe.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização.
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let address_routes = Router::new()
        .route(
            "/",
            post(handlers::restaurants::create_address).get(handlers::restaurants::list_addresses),
        )
        .route(
            "/available",
            get(handlers::restaurants::list_available_addresses),
        );

    let restaurant_routes = Router::new()
        .route(
            "/",
            post(handlers::restaurants::create_restaurant)
                .get(handlers::restaurants::list_restaurants),
        )
        .route("/search", post(handlers::restaurants::search_restaurants))
        .route(
            "/{id}",
            get(handlers::restaurants::get_restaurant)
                .put(handlers::restaurants::update_restaurant)
                .delete(handlers::restaurants::delete_restaurant),
        )
        .route(
            "/{id}/frequent-customers",
            post(handlers::restaurants::add_frequent_customer),
        )
        .route(
            "/{id}/frequent-customers/{customer_id}",
            delete(handlers::restaurants::remove_frequent_customer),
        );

    let tag_routes = Router::new().route(
        "/",
        post(handlers::menu::create_tag).get(handlers::menu::list_tags),
    );

    let dish_routes = Router::new()
        .route(
            "/",
            post(handlers::menu::create_dish).get(handlers::menu::list_dishes),
        )
        .route("/search", get(handlers::menu::search_dishes))
        .route(
            "/category/{category}",
            get(handlers::menu::list_dishes_by_category),
        )
        .route(
            "/{id}",
            put(handlers::menu::update_dish).delete(handlers::menu::delete_dish),
        )
        .route("/{id}/tags", get(handlers::menu::get_dish_tags));

    let customer_routes = Router::new()
        .route(
            "/",
            post(handlers::crm::create_customer).get(handlers::crm::list_customers),
        )
        .route(
            "/{id}",
            get(handlers::crm::get_customer)
                .put(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        )
        .route(
            "/{id}/profile",
            get(handlers::crm::get_profile).put(handlers::crm::upsert_profile),
        );

    let table_routes = Router::new()
        .route(
            "/",
            post(handlers::reservations::create_table).get(handlers::reservations::list_tables),
        )
        .route("/active", get(handlers::reservations::list_active_tables))
        .route("/{id}", put(handlers::reservations::update_table));

    let reservation_routes = Router::new()
        .route(
            "/",
            post(handlers::reservations::create_reservation)
                .get(handlers::reservations::list_reservations),
        )
        .route(
            "/{id}",
            get(handlers::reservations::get_reservation)
                .put(handlers::reservations::update_reservation)
                .delete(handlers::reservations::delete_reservation),
        );

    let order_routes = Router::new()
        .route(
            "/",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route("/summary", get(handlers::orders::get_summary))
        .route(
            "/without-lines",
            get(handlers::orders::list_orders_without_lines),
        )
        .route(
            "/{id}",
            get(handlers::orders::get_order).delete(handlers::orders::delete_order),
        )
        .route("/{id}/lines", post(handlers::orders::add_order_line))
        .route("/{id}/pay", put(handlers::orders::pay_order));

    let report_routes = Router::new()
        .route(
            "/frequent-customers",
            get(handlers::reports::frequent_customers),
        )
        .route("/search/{text}", get(handlers::reports::quick_search));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/addresses", address_routes)
        .nest("/api/restaurants", restaurant_routes)
        .nest("/api/tags", tag_routes)
        .nest("/api/dishes", dish_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/tables", table_routes)
        .nest("/api/reservations", reservation_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/reports", report_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
