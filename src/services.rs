pub mod crm_service;
pub use crm_service::CrmService;
pub mod menu_service;
pub use menu_service::MenuService;
pub mod order_service;
pub use order_service::OrderService;
pub mod report_service;
pub use report_service::ReportService;
pub mod reservation_service;
pub use reservation_service::ReservationService;
pub mod restaurant_service;
pub use restaurant_service::RestaurantService;
