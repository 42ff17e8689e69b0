pub mod expiry;
pub mod outbox;

pub use expiry::run_expiry_sweep;
pub use outbox::run_dispatch_tick;
