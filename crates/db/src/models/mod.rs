pub mod auditorium;
pub mod cinema;
pub mod movie;
pub mod outbox;
pub mod showtime;
pub mod ticket;

pub use auditorium::Auditorium;
pub use cinema::Cinema;
pub use movie::Movie;
pub use outbox::{event_types, OutboxMessage};
pub use showtime::Showtime;
pub use ticket::{Ticket, TicketWithShowtime};
