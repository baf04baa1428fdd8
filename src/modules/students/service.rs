use anyhow::Context;
use parent_portal_core::{AppError, Role};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::model::{Attendance, AttendanceUpdateDto, CreateStudentDto, Student};

const STUDENT_COLUMNS: &str =
    "id, name, roll_number, class_name, section, parent_id, present, absent, total, created_at";

const STUDENT_ORDER: &str = "ORDER BY class_name, section, roll_number";

fn student_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Student not found"))
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn list_for_parent(db: &PgPool, parent_id: Uuid) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE parent_id = $1 {STUDENT_ORDER}"
        ))
        .bind(parent_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch students by parent")
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn list_for_class_section(
        db: &PgPool,
        class_name: &str,
        section: &str,
    ) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE class_name = $1 AND section = $2 {STUDENT_ORDER}"
        ))
        .bind(class_name)
        .bind(section)
        .fetch_all(db)
        .await
        .context("Failed to fetch students by class and section")
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn list_all(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let students =
            sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students {STUDENT_ORDER}"))
                .fetch_all(db)
                .await
                .context("Failed to fetch students")
                .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student")
            .map_err(AppError::database)?
            .ok_or_else(student_not_found)
    }

    /// Creates a student. `parent_id` must reference an existing parent account.
    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let parent_role = sqlx::query_scalar::<_, Role>("SELECT role FROM users WHERE id = $1")
            .bind(dto.parent_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch parent")
            .map_err(AppError::database)?;

        match parent_role {
            None => {
                return Err(AppError::bad_request(anyhow::anyhow!("Parent not found")));
            }
            Some(role) if role != Role::Parent => {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Parent ID must belong to a parent account"
                )));
            }
            Some(_) => {}
        }

        let initial = dto.attendance.unwrap_or_default();
        let attendance = Attendance::new(initial.present, initial.absent);

        let result = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (name, roll_number, class_name, section, parent_id, present, absent, total)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.roll_number.trim())
        .bind(dto.class_name.trim())
        .bind(dto.section.trim())
        .bind(dto.parent_id)
        .bind(attendance.present)
        .bind(attendance.absent)
        .bind(attendance.total)
        .fetch_one(db)
        .await;

        match result {
            Ok(student) => {
                info!(student_id = %student.id, "Student created");
                Ok(student)
            }
            Err(e) => {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return Err(AppError::bad_request(anyhow::anyhow!(
                            "Student with this roll number already exists"
                        )));
                    }
                }
                Err(AppError::database(
                    anyhow::Error::new(e).context("Failed to create student"),
                ))
            }
        }
    }

    /// Sets the supplied counters and recomputes `total` in one statement.
    #[instrument(skip(db))]
    pub async fn update_attendance(
        db: &PgPool,
        id: Uuid,
        dto: AttendanceUpdateDto,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET present = COALESCE($2, present),
                 absent = COALESCE($3, absent),
                 total = COALESCE($2, present) + COALESCE($3, absent)
             WHERE id = $1
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.present)
        .bind(dto.absent)
        .fetch_optional(db)
        .await
        .context("Failed to update attendance")
        .map_err(AppError::database)?
        .ok_or_else(student_not_found)
    }
}
