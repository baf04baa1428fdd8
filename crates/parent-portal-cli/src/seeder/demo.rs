//! The fixed demo dataset: one account per role, two students, two homework
//! items and a short teacher/parent exchange.

use chrono::{Duration, NaiveDate, Utc};
use parent_portal_core::Role;
use parent_portal_models::Attendance;
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use super::models::{StudentSeed, UserSeed};

pub const DEMO_PASSWORD: &str = "password";

pub struct DemoHomework {
    pub title: &'static str,
    pub description: &'static str,
    pub subject: &'static str,
    pub due_in_days: i64,
}

pub const DEMO_HOMEWORK: [DemoHomework; 2] = [
    DemoHomework {
        title: "Math Assignment",
        description: "Complete problems 1-20 from Chapter 5",
        subject: "Mathematics",
        due_in_days: 7,
    },
    DemoHomework {
        title: "Science Project",
        description: "Prepare a presentation on renewable energy",
        subject: "Science",
        due_in_days: 14,
    },
];

pub fn demo_users(password_hash: &str) -> [UserSeed; 3] {
    let user = |name: &str, email: &str, phone: &str, role| UserSeed {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        phone: phone.to_string(),
        role,
    };

    [
        user("Admin User", "admin@example.com", "5550100000", Role::Admin),
        user("Mary Teacher", "teacher@example.com", "5550200000", Role::Teacher),
        user("John Parent", "parent@example.com", "5550300000", Role::Parent),
    ]
}

pub fn demo_students() -> [StudentSeed; 2] {
    [
        StudentSeed {
            name: "Alex Smith".to_string(),
            roll_number: "101".to_string(),
            class_name: "10".to_string(),
            section: "A".to_string(),
            attendance: Attendance::new(42, 3),
        },
        StudentSeed {
            name: "Emma Smith".to_string(),
            roll_number: "102".to_string(),
            class_name: "8".to_string(),
            section: "B".to_string(),
            attendance: Attendance::new(40, 5),
        },
    ]
}

pub fn due_date(today: NaiveDate, homework: &DemoHomework) -> NaiveDate {
    today + Duration::days(homework.due_in_days)
}

/// Inserts the demo dataset in a single transaction.
pub async fn seed_demo(db: &PgPool, password_hash: &str) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("👥 Seeding demo accounts...");

    let mut tx = db.begin().await?;

    let mut ids = Vec::with_capacity(3);
    for user in demo_users(password_hash) {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (name, email, password, phone, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(user.role)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }
    let (teacher_id, parent_id) = (ids[1], ids[2]);

    for student in demo_students() {
        sqlx::query(
            "INSERT INTO students (name, roll_number, class_name, section, parent_id, present, absent, total)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&student.name)
        .bind(&student.roll_number)
        .bind(&student.class_name)
        .bind(&student.section)
        .bind(parent_id)
        .bind(student.attendance.present)
        .bind(student.attendance.absent)
        .bind(student.attendance.total)
        .execute(&mut *tx)
        .await?;
    }

    let today = Utc::now().date_naive();
    for homework in &DEMO_HOMEWORK {
        sqlx::query(
            "INSERT INTO homework (title, description, class_name, section, subject, due_date, uploaded_by)
             VALUES ($1, $2, '10', 'A', $3, $4, $5)",
        )
        .bind(homework.title)
        .bind(homework.description)
        .bind(homework.subject)
        .bind(due_date(today, homework))
        .bind(teacher_id)
        .execute(&mut *tx)
        .await?;
    }

    let messages = [
        (teacher_id, parent_id, "Hello! This is about your child's progress.", true),
        (parent_id, teacher_id, "Thank you for letting me know. Can we discuss further?", false),
    ];
    for (sender, receiver, content, is_read) in messages {
        sqlx::query(
            "INSERT INTO messages (sender_id, receiver_id, content, is_read)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(sender)
        .bind(receiver)
        .bind(content)
        .bind(is_read)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    println!("   ✓ Inserted demo data in {:?}", start_time.elapsed());
    Ok(())
}
