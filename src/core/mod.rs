//! Domain types mirrored from the helpdesk API
//!
//! The server owns every record. These types only exist long enough to be
//! rendered or sent back, so they carry no invariants beyond what the wire
//! format guarantees.

mod builders;
pub mod filter;
pub mod permissions;
mod requests;
mod ticket;
mod user;

pub use builders::{TicketBuilder, TicketRequestBuilder};
pub use filter::{SortBy, TicketFilter};
pub use requests::{
    AssignTicketRequest, CommentRequest, LoginRequest, RateTicketRequest, RegisterRequest,
    TicketRequest, UpdateStatusRequest,
};
pub use ticket::{Attachment, Comment, Priority, Status, Ticket, TicketId};
pub use user::{AuthResponse, Role, User, UserId};
