mod booking_reference;
mod confirm;
mod list;
mod reserve;

pub use booking_reference::generate_booking_reference;
pub use confirm::confirm_payment;
pub use list::list_my_tickets;
pub use reserve::{reserve, ReserveOutcome};
