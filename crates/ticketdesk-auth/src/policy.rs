//! Pure authorization policy.
//!
//! Every rule here is a pure function over an already-resolved
//! [`Identity`] and the entity rows it is judged against. The services call
//! these at their boundaries; nothing in this module touches a store.

use ticketdesk_entity::{Attachment, Comment, Identity, Ticket};

/// Whether the actor may see the ticket at all.
///
/// Admin-equivalent actors see every ticket. Ordinary users see tickets
/// they own and tickets assigned to them.
pub fn can_access_ticket(identity: &Identity, ticket: &Ticket) -> bool {
    if identity.is_admin_equivalent() {
        return true;
    }
    match identity.user_id() {
        Some(id) => ticket.owner_id == id || ticket.assignee_id == Some(id),
        None => false,
    }
}

/// Whether the actor may see an individual comment.
///
/// Requires ticket access; internal comments are additionally restricted
/// to admin-equivalent actors.
pub fn can_view_comment(identity: &Identity, ticket: &Ticket, comment: &Comment) -> bool {
    if !can_access_ticket(identity, ticket) {
        return false;
    }
    !comment.is_internal || identity.is_admin_equivalent()
}

/// Whether the actor may edit or delete a comment.
///
/// The original author may mutate their own comment; admin-equivalent
/// actors may mutate any comment.
pub fn can_mutate_comment(identity: &Identity, comment: &Comment) -> bool {
    if identity.is_admin_equivalent() {
        return true;
    }
    identity.user_id() == Some(comment.author_id)
}

/// Whether the actor may delete a standalone attachment.
pub fn can_delete_attachment(identity: &Identity, attachment: &Attachment) -> bool {
    if identity.is_admin_equivalent() {
        return true;
    }
    identity.user_id() == Some(attachment.uploaded_by)
}
