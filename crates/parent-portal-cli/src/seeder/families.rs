//! Fake family seeding.
//!
//! Generates parent accounts with children using `fake` and inserts them with
//! multi-value INSERT statements.

use fake::Fake;
use fake::faker::name::en::*;
use parent_portal_core::Role;
use parent_portal_models::Attendance;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{FamilySeed, SeedConfig, StudentSeed, UserSeed};

pub const SECTIONS: [&str; 3] = ["A", "B", "C"];

/// Generates families in parallel. `batch` keeps emails and roll numbers
/// unique across repeated runs.
pub fn generate_families(config: &SeedConfig, batch: &str, password_hash: &str) -> Vec<FamilySeed> {
    (0..config.fake_parents)
        .into_par_iter()
        .map(|family_idx| {
            let last_name: String = LastName().fake();
            let parent_first: String = FirstName().fake();
            let phone: u64 = (2_000_000_000..9_999_999_999).fake();

            let parent = UserSeed {
                name: format!("{} {}", parent_first, last_name),
                email: format!(
                    "{}.{}+parent{}.{}@example.com",
                    parent_first.to_lowercase(),
                    last_name.to_lowercase(),
                    family_idx,
                    batch
                ),
                password_hash: password_hash.to_string(),
                phone: phone.to_string(),
                role: Role::Parent,
            };

            let children = (0..config.children_per_parent)
                .map(|child_idx| generate_child(&last_name, batch, family_idx, child_idx))
                .collect();

            FamilySeed { parent, children }
        })
        .collect()
}

fn generate_child(last_name: &str, batch: &str, family_idx: usize, child_idx: usize) -> StudentSeed {
    let first_name: String = FirstName().fake();
    let class: u8 = (1..=12).fake();
    let section = SECTIONS[(0..SECTIONS.len()).fake::<usize>()];
    let present: i32 = (30..=45).fake();
    let absent: i32 = (0..=5).fake();

    StudentSeed {
        name: format!("{} {}", first_name, last_name),
        roll_number: format!("{}-{}-{}", batch, family_idx, child_idx),
        class_name: class.to_string(),
        section: section.to_string(),
        attendance: Attendance::new(present, absent),
    }
}

/// Seeds fake families into the database
pub async fn seed_families(
    db: &PgPool,
    config: &SeedConfig,
    password_hash: &str,
) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!(
        "👨‍👩‍👧 Seeding {} fake families ({} children each)...",
        config.fake_parents, config.children_per_parent
    );

    let batch = Uuid::new_v4().simple().to_string()[..8].to_string();
    let families = generate_families(config, &batch, password_hash);

    let mut tx = db.begin().await?;
    let mut students = 0;

    // 5 params per user
    const BATCH_SIZE: usize = 1000;

    for chunk in families.chunks(BATCH_SIZE) {
        let parent_ids = insert_parents_chunk(&mut tx, chunk).await?;
        for (parent_id, family) in parent_ids.iter().zip(chunk) {
            students += insert_children(&mut tx, *parent_id, &family.children).await?;
        }
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} parents and {} students in {:?}",
        families.len(),
        students,
        start_time.elapsed()
    );

    Ok(families.len())
}

async fn insert_parents_chunk(
    tx: &mut Transaction<'_, Postgres>,
    families: &[FamilySeed],
) -> anyhow::Result<Vec<Uuid>> {
    if families.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (name, email, password, phone, role) VALUES ");

    for i in 0..families.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for family in families {
        let parent = &family.parent;
        q = q
            .bind(&parent.name)
            .bind(&parent.email)
            .bind(&parent.password_hash)
            .bind(&parent.phone)
            .bind(parent.role);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    parent_id: Uuid,
    children: &[StudentSeed],
) -> anyhow::Result<usize> {
    if children.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO students (name, roll_number, class_name, section, parent_id, present, absent, total) VALUES ",
    );

    for i in 0..children.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 8;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7,
            p + 8
        ));
    }

    let mut q = sqlx::query(&query);
    for child in children {
        q = q
            .bind(&child.name)
            .bind(&child.roll_number)
            .bind(&child.class_name)
            .bind(&child.section)
            .bind(parent_id)
            .bind(child.attendance.present)
            .bind(child.attendance.absent)
            .bind(child.attendance.total);
    }

    let result = q.execute(&mut **tx).await?;
    Ok(result.rows_affected() as usize)
}
