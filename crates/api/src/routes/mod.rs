pub mod auditoriums;
pub mod cinemas;
pub mod movies;
pub mod showtimes;
pub mod tickets;
