//! Centralized permission table for the Parent Portal API.
//!
//! Every route gate and every ownership check consults [`lookup`] instead of
//! comparing role strings. A `(role, resource, action)` triple either has no
//! entry (denied) or maps to a [`Scope`]:
//!
//! - [`Scope::Any`]: the role may act on any record of the resource.
//! - [`Scope::Own`]: the role may act only on records it owns (a parent's
//!   children, a user's own profile, messages addressed to the user).
//!
//! # Example
//!
//! ```ignore
//! use parent_portal_core::permissions::{Action, Resource, allowed_roles, is_allowed};
//! use parent_portal_core::Role;
//!
//! assert!(!is_allowed(Role::Parent, Resource::Homework, Action::Create));
//! assert_eq!(allowed_roles(Resource::Students, Action::Create), vec![Role::Teacher, Role::Admin]);
//! ```

use crate::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Students,
    Homework,
    Messages,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Own,
    Any,
}

use Action::*;
use Resource::*;
use Role::*;
use Scope::{Any, Own};

const TABLE: &[(Role, Resource, Action, Scope)] = &[
    // Students
    (Parent, Students, Read, Own),
    (Teacher, Students, Read, Any),
    (Admin, Students, Read, Any),
    (Teacher, Students, Create, Any),
    (Admin, Students, Create, Any),
    (Teacher, Students, Update, Any),
    (Admin, Students, Update, Any),
    // Homework
    (Parent, Homework, Read, Any),
    (Teacher, Homework, Read, Any),
    (Admin, Homework, Read, Any),
    (Teacher, Homework, Create, Any),
    (Admin, Homework, Create, Any),
    // Messages
    (Parent, Messages, Read, Own),
    (Teacher, Messages, Read, Own),
    (Admin, Messages, Read, Own),
    (Parent, Messages, Create, Own),
    (Teacher, Messages, Create, Own),
    (Admin, Messages, Create, Own),
    (Parent, Messages, Update, Own),
    (Teacher, Messages, Update, Own),
    (Admin, Messages, Update, Own),
    // Users
    (Parent, Users, Read, Any),
    (Teacher, Users, Read, Any),
    (Admin, Users, Read, Any),
    (Parent, Users, Update, Own),
    (Teacher, Users, Update, Own),
    (Admin, Users, Update, Any),
];

/// Returns the scope granted to `role` for `action` on `resource`, or `None`
/// when the combination is denied.
pub fn lookup(role: Role, resource: Resource, action: Action) -> Option<Scope> {
    TABLE
        .iter()
        .find(|(r, res, act, _)| *r == role && *res == resource && *act == action)
        .map(|(_, _, _, scope)| *scope)
}

pub fn is_allowed(role: Role, resource: Resource, action: Action) -> bool {
    lookup(role, resource, action).is_some()
}

/// Whether `role` may act on a record owned by `owner` when the caller is `actor`.
pub fn may_act_on<T: PartialEq>(
    role: Role,
    resource: Resource,
    action: Action,
    actor: &T,
    owner: &T,
) -> bool {
    match lookup(role, resource, action) {
        Some(Any) => true,
        Some(Own) => actor == owner,
        None => false,
    }
}

/// The role whitelist for a route, derived from the table.
pub fn allowed_roles(resource: Resource, action: Action) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| is_allowed(*role, resource, action))
        .collect()
}
