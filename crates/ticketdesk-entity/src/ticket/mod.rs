//! Ticket entity.

pub mod model;
pub mod priority;
pub mod status;

pub use model::{Ticket, TicketRef};
pub use priority::TicketPriority;
pub use status::TicketStatus;
