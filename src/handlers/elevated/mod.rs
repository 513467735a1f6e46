// handlers/elevated/mod.rs - Admin handlers (admin session required)
//
// Every handler here starts with `admin_guard` and returns its denial
// untouched. Collaborators are only reached with an authorized principal.

pub mod payments;
