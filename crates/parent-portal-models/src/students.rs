//! Student domain models and DTOs.
//!
//! Attendance is three counters where `total` is always derived as
//! `present + absent`. The database enforces the same rule with a CHECK
//! constraint, and updates recompute it inside a single UPDATE statement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Upper bound for a single attendance counter. Two counters at this bound
/// still sum inside `i32`, so neither `Attendance::new` nor the SQL update
/// can overflow.
pub const MAX_ATTENDANCE: i32 = 100_000;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, Copy, Default, PartialEq, Eq, ToSchema)]
pub struct Attendance {
    pub present: i32,
    pub absent: i32,
    pub total: i32,
}

impl Attendance {
    pub fn new(present: i32, absent: i32) -> Self {
        Self {
            present,
            absent,
            total: present + absent,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.present >= 0 && self.absent >= 0 && self.total == self.present + self.absent
    }
}

/// A student record.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub roll_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub section: String,
    pub parent_id: Uuid,
    #[sqlx(flatten)]
    pub attendance: Attendance,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, Validate, ToSchema)]
pub struct InitialAttendance {
    #[serde(default)]
    #[validate(range(
        min = 0,
        max = MAX_ATTENDANCE,
        message = "Attendance counters must be between 0 and 100000"
    ))]
    pub present: i32,
    #[serde(default)]
    #[validate(range(
        min = 0,
        max = MAX_ATTENDANCE,
        message = "Attendance counters must be between 0 and 100000"
    ))]
    pub absent: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Alex Smith")]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Roll number is required"))]
    #[schema(example = "101")]
    pub roll_number: String,
    #[serde(rename = "class")]
    #[validate(length(min = 1, max = 50, message = "Class is required"))]
    #[schema(example = "10")]
    pub class_name: String,
    #[validate(length(min = 1, max = 50, message = "Section is required"))]
    #[schema(example = "A")]
    pub section: String,
    pub parent_id: Uuid,
    #[serde(default)]
    #[validate(nested)]
    pub attendance: Option<InitialAttendance>,
}

fn at_least_one_counter(dto: &AttendanceUpdateDto) -> Result<(), ValidationError> {
    if dto.present.is_none() && dto.absent.is_none() {
        return Err(ValidationError::new("attendance")
            .with_message("Present or absent count is required".into()));
    }
    Ok(())
}

/// Partial attendance update. At least one counter must be supplied.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, Validate, ToSchema)]
#[validate(schema(function = "at_least_one_counter"))]
pub struct AttendanceUpdateDto {
    #[validate(range(
        min = 0,
        max = MAX_ATTENDANCE,
        message = "Attendance counters must be between 0 and 100000"
    ))]
    #[schema(example = 18)]
    pub present: Option<i32>,
    #[validate(range(
        min = 0,
        max = MAX_ATTENDANCE,
        message = "Attendance counters must be between 0 and 100000"
    ))]
    #[schema(example = 2)]
    pub absent: Option<i32>,
}

/// Filters for `GET /api/students`. Ignored for parents, who always see
/// their own children.
#[derive(Deserialize, Serialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl StudentQuery {
    /// Trimmed `(class, section)`, only when both are present and non-empty.
    pub fn class_and_section(&self) -> Option<(&str, &str)> {
        let class_name = self.class_name.as_deref()?.trim();
        let section = self.section.as_deref()?.trim();
        if class_name.is_empty() || section.is_empty() {
            return None;
        }
        Some((class_name, section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_total_is_derived() {
        let attendance = Attendance::new(18, 2);
        assert_eq!(attendance.total, 20);
        assert!(attendance.is_consistent());
    }

    #[test]
    fn test_update_rejects_counters_that_would_overflow_the_total() {
        let dto = AttendanceUpdateDto {
            present: Some(i32::MAX),
            absent: Some(1),
        };
        assert!(dto.validate().is_err());

        let dto = AttendanceUpdateDto {
            present: Some(MAX_ATTENDANCE),
            absent: Some(MAX_ATTENDANCE),
        };
        assert!(dto.validate().is_ok());
        assert_eq!(Attendance::new(MAX_ATTENDANCE, MAX_ATTENDANCE).total, 200_000);
    }

    #[test]
    fn test_create_dto_rejects_oversized_initial_attendance() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{"name":"Emma Smith","rollNumber":"102","class":"8","section":"B","parentId":"7d4f1c1e-9f59-4d4e-9b56-0e8f5f0c2a11","attendance":{"present":2147483647,"absent":1}}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_student_query_trims_class_and_section() {
        let query = StudentQuery {
            class_name: Some(" 10 ".to_string()),
            section: Some("A ".to_string()),
            parent_id: None,
        };
        assert_eq!(query.class_and_section(), Some(("10", "A")));

        let query = StudentQuery {
            class_name: Some("10".to_string()),
            section: Some("  ".to_string()),
            parent_id: None,
        };
        assert!(query.class_and_section().is_none());
    }

    #[test]
    fn test_update_rejects_negative_counters() {
        let dto = AttendanceUpdateDto {
            present: Some(-1),
            absent: Some(2),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_requires_a_counter() {
        assert!(AttendanceUpdateDto::default().validate().is_err());
    }

    #[test]
    fn test_student_wire_format() {
        let student = Student {
            id: Uuid::new_v4(),
            name: "Alex Smith".to_string(),
            roll_number: "101".to_string(),
            class_name: "10".to_string(),
            section: "A".to_string(),
            parent_id: Uuid::new_v4(),
            attendance: Attendance::new(42, 3),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["rollNumber"], "101");
        assert_eq!(json["class"], "10");
        assert_eq!(json["attendance"]["total"], 45);
        assert!(json.get("parentId").is_some());
    }

    #[test]
    fn test_create_dto_reads_class_field() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{"name":"Emma Smith","rollNumber":"102","class":"8","section":"B","parentId":"7d4f1c1e-9f59-4d4e-9b56-0e8f5f0c2a11"}"#,
        )
        .unwrap();
        assert_eq!(dto.class_name, "8");
        assert!(dto.attendance.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_negative_initial_attendance() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{"name":"Emma Smith","rollNumber":"102","class":"8","section":"B","parentId":"7d4f1c1e-9f59-4d4e-9b56-0e8f5f0c2a11","attendance":{"present":-4}}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }
}
