// src/config.rs

use chrono::NaiveTime;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CrmRepository, MenuRepository, OrderRepository, ReportRepository, ReservationRepository,
        RestaurantRepository,
    },
    services::{
        CrmService, MenuService, OrderService, ReportService, ReservationService,
        RestaurantService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub restaurant_service: RestaurantService,
    pub menu_service: MenuService,
    pub crm_service: CrmService,
    pub reservation_service: ReservationService,
    pub order_service: OrderService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let service_window = service_window_from_env()?;

        // --- Monta o grafo de dependências ---
        let restaurant_service =
            RestaurantService::new(RestaurantRepository::new(db_pool.clone()));
        let menu_service = MenuService::new(MenuRepository::new(db_pool.clone()));
        let crm_service = CrmService::new(CrmRepository::new(db_pool.clone()));
        let reservation_service = ReservationService::new(
            ReservationRepository::new(db_pool.clone()),
            service_window,
        );
        let order_service = OrderService::new(OrderRepository::new(db_pool.clone()));
        let report_service = ReportService::new(ReportRepository::new(db_pool.clone()));

        Ok(Self {
            db_pool,
            restaurant_service,
            menu_service,
            crm_service,
            reservation_service,
            order_service,
            report_service,
        })
    }
}

/// Janela de serviço das reservas, em horas cheias, inclusiva nas duas pontas.
fn service_window_from_env() -> anyhow::Result<(NaiveTime, NaiveTime)> {
    let opens_at = parse_hour("SERVICE_WINDOW_START", 12)?;
    let closes_at = parse_hour("SERVICE_WINDOW_END", 23)?;
    anyhow::ensure!(
        opens_at <= closes_at,
        "SERVICE_WINDOW_START deve ser menor ou igual a SERVICE_WINDOW_END"
    );
    Ok((opens_at, closes_at))
}

fn parse_hour(var: &str, default: u32) -> anyhow::Result<NaiveTime> {
    let hour = match env::var(var) {
        Ok(value) => value.parse::<u32>()?,
        Err(_) => default,
    };
    NaiveTime::from_hms_opt(hour, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("{} deve estar entre 0 e 23", var))
}
