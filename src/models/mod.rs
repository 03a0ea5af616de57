//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema SQLite.

pub mod car;
pub mod driver;
pub mod manufacturer;
pub mod session;

pub use car::{Car, CarWithManufacturer};
pub use driver::Driver;
pub use manufacturer::Manufacturer;
pub use session::{Session, SessionData};
