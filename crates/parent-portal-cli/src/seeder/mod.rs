//! Database seeding.
//!
//! `seed_all` wipes existing data, inserts the demo dataset and then any
//! requested fake families. Every seeded account uses [`DEMO_PASSWORD`].

pub mod demo;
pub mod families;
pub mod models;

use parent_portal_core::hash_password;
use sqlx::PgPool;
use std::time::Instant;

pub use demo::{DEMO_PASSWORD, seed_demo};
pub use families::{generate_families, seed_families};
pub use models::{FamilySeed, SeedConfig, StudentSeed, UserSeed};

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🌱 Starting database seed...\n");

    clear_all(db).await?;

    let password_hash = hash_password(DEMO_PASSWORD).map_err(|e| e.error)?;

    seed_demo(db, &password_hash).await?;

    if config.fake_parents > 0 {
        seed_families(db, &config, &password_hash).await?;
    }

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("\nTest accounts (password: {}):", DEMO_PASSWORD);
    println!("   Parent:  parent@example.com");
    println!("   Teacher: teacher@example.com");
    println!("   Admin:   admin@example.com");

    Ok(())
}

/// Deletes every row from every table.
pub async fn clear_all(db: &PgPool) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🗑️  Clearing existing data...");

    sqlx::query("TRUNCATE messages, homework, students, users")
        .execute(db)
        .await?;

    println!("   ✓ Cleared all tables in {:?}", start_time.elapsed());
    Ok(())
}
