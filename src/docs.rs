// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Endereços ---
        handlers::restaurants::create_address,
        handlers::restaurants::list_addresses,
        handlers::restaurants::list_available_addresses,

        // --- Restaurantes ---
        handlers::restaurants::create_restaurant,
        handlers::restaurants::list_restaurants,
        handlers::restaurants::get_restaurant,
        handlers::restaurants::update_restaurant,
        handlers::restaurants::delete_restaurant,
        handlers::restaurants::search_restaurants,
        handlers::restaurants::add_frequent_customer,
        handlers::restaurants::remove_frequent_customer,

        // --- Cardápio ---
        handlers::menu::create_tag,
        handlers::menu::list_tags,
        handlers::menu::create_dish,
        handlers::menu::update_dish,
        handlers::menu::delete_dish,
        handlers::menu::get_dish_tags,
        handlers::menu::list_dishes,
        handlers::menu::list_dishes_by_category,
        handlers::menu::search_dishes,

        // --- Clientes ---
        handlers::crm::create_customer,
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,
        handlers::crm::get_profile,
        handlers::crm::upsert_profile,

        // --- Reservas ---
        handlers::reservations::create_table,
        handlers::reservations::update_table,
        handlers::reservations::list_tables,
        handlers::reservations::list_active_tables,
        handlers::reservations::create_reservation,
        handlers::reservations::update_reservation,
        handlers::reservations::list_reservations,
        handlers::reservations::get_reservation,
        handlers::reservations::delete_reservation,

        // --- Pedidos ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_summary,
        handlers::orders::list_orders_without_lines,
        handlers::orders::get_order,
        handlers::orders::add_order_line,
        handlers::orders::pay_order,
        handlers::orders::delete_order,

        // --- Relatórios ---
        handlers::reports::frequent_customers,
        handlers::reports::quick_search,
    ),
    components(
        schemas(
            models::restaurants::Address,
            models::restaurants::Restaurant,
            models::restaurants::RestaurantListing,
            models::restaurants::RestaurantDetail,
            models::menu::Tag,
            models::menu::Dish,
            models::crm::Customer,
            models::crm::CustomerProfile,
            models::reservations::DiningTable,
            models::reservations::ReservationStatus,
            models::reservations::Reservation,
            models::orders::Order,
            models::orders::OrderLine,
            models::orders::OrderDetail,
            models::reports::OrderSummary,
            models::reports::OrdersOverview,
            models::reports::CustomerOrderCount,
            models::reports::QuickSearchResult,
            handlers::restaurants::CreateAddressPayload,
            handlers::restaurants::RestaurantPayload,
            handlers::restaurants::SearchRestaurantsPayload,
            handlers::restaurants::FrequentCustomerPayload,
            handlers::menu::CreateTagPayload,
            handlers::menu::CreateDishPayload,
            handlers::menu::UpdateDishPayload,
            handlers::crm::CustomerPayload,
            handlers::crm::ProfilePayload,
            handlers::reservations::CreateTablePayload,
            handlers::reservations::UpdateTablePayload,
            handlers::reservations::CreateReservationPayload,
            handlers::reservations::UpdateReservationPayload,
            handlers::orders::OrderLinePayload,
            handlers::orders::CreateOrderPayload,
        )
    ),
    tags(
        (name = "Endereços", description = "Endereços dos restaurantes"),
        (name = "Restaurantes", description = "Cadastro, busca e detalhe"),
        (name = "Cardápio", description = "Pratos e etiquetas"),
        (name = "Clientes", description = "Clientes e perfis"),
        (name = "Reservas", description = "Mesas e reservas"),
        (name = "Pedidos", description = "Pedidos e linhas"),
        (name = "Relatórios", description = "Listagens agregadas"),
    ),
    info(
        title = "Restaurante Backend",
        description = "Back office de restaurantes: cadastros, reservas, pedidos e relatórios.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
