pub mod engine;
pub mod expiry;
pub mod outbox;
pub mod policy;
pub mod reservation;
pub mod seatmap;

pub use seatmap::SeatMapCache;
