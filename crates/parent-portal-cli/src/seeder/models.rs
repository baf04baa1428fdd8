//! Data models for database seeding configuration.

use parent_portal_core::Role;
use parent_portal_models::Attendance;

/// Seed data for creating a user.
pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: Role,
}

/// Seed data for creating a student. The parent is assigned at insert time.
pub struct StudentSeed {
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub attendance: Attendance,
}

/// A parent account together with their children.
pub struct FamilySeed {
    pub parent: UserSeed,
    pub children: Vec<StudentSeed>,
}

/// Configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub fake_parents: usize,
    pub children_per_parent: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            fake_parents: 0,
            children_per_parent: 2,
        }
    }
}

impl SeedConfig {
    /// Creates a seed configuration with the given number of fake families.
    pub fn new(fake_parents: usize) -> Self {
        Self {
            fake_parents,
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children_per_parent: usize) -> Self {
        self.children_per_parent = children_per_parent;
        self
    }

    pub fn total_fake_students(&self) -> usize {
        self.fake_parents * self.children_per_parent
    }
}
