pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::database::{connect, connect_in_memory, ping, run_migrations};
pub use error::{DbError, Result};
pub use repositories::booking_repository::BookingRepository;
pub use repositories::event_repository::EventRepository;
pub use repositories::user_repository::UserRepository;
