//! Client-side gating of actions
//!
//! These checks only decide whether the client offers an action. The server
//! repeats every check and stays authoritative.

use super::{Role, Ticket, UserId};

/// The acting user, as far as gating is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

/// Staff or the ticket's creator may change its status
pub fn can_update_status(actor: Actor, ticket: &Ticket) -> bool {
    actor.role.is_staff() || ticket.is_created_by(actor.id)
}

/// Only staff assign tickets
pub const fn can_assign(actor: Actor) -> bool {
    actor.role.is_staff()
}

/// The creator rates a finished ticket once
pub fn can_rate(actor: Actor, ticket: &Ticket) -> bool {
    ticket.is_created_by(actor.id) && ticket.status.is_finished() && !ticket.is_rated()
}

pub const fn can_manage_users(actor: Actor) -> bool {
    matches!(actor.role, Role::Admin)
}

/// Admins may change or delete any account except their own
pub const fn can_modify_account(actor: Actor, target: UserId) -> bool {
    can_manage_users(actor) && actor.id != target
}
