pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod menu_repo;
pub use menu_repo::MenuRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod reservation_repo;
pub use reservation_repo::ReservationRepository;
pub mod restaurant_repo;
pub use restaurant_repo::RestaurantRepository;
