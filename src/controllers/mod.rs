pub mod car_controller;
pub mod driver_controller;
pub mod index_controller;
pub mod manufacturer_controller;
