pub mod crm;
pub mod menu;
pub mod orders;
pub mod reports;
pub mod reservations;
pub mod restaurants;
