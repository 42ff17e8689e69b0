pub mod auditoriums;
pub mod cinemas;
pub mod movies;
pub mod outbox;
pub mod showtimes;
pub mod tickets;
