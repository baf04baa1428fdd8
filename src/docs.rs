use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use crate::modules::homework::model::{CreateHomeworkDto, Homework};
use crate::modules::messages::model::{ConversationSummary, Message, SendMessageDto};
use crate::modules::students::model::{
    Attendance, AttendanceUpdateDto, CreateStudentDto, InitialAttendance, Student,
};
use crate::modules::users::model::{ChangePasswordDto, UpdateProfileDto, User, UserSummary};
use crate::router::StatusResponse;
use parent_portal_core::Role;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::api_status,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_attendance,
        crate::modules::homework::controller::get_homework,
        crate::modules::homework::controller::create_homework,
        crate::modules::messages::controller::get_messages,
        crate::modules::messages::controller::get_conversations,
        crate::modules::messages::controller::get_conversation,
        crate::modules::messages::controller::send_message,
        crate::modules::messages::controller::mark_message_read,
        crate::modules::users::controller::get_available_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_own_profile,
        crate::modules::users::controller::update_user_profile,
        crate::modules::users::controller::update_own_password,
        crate::modules::users::controller::update_user_password,
    ),
    components(
        schemas(
            Role,
            User,
            UserSummary,
            UpdateProfileDto,
            ChangePasswordDto,
            LoginRequest,
            RegisterRequest,
            AuthResponse,
            MessageResponse,
            Student,
            Attendance,
            InitialAttendance,
            CreateStudentDto,
            AttendanceUpdateDto,
            Homework,
            CreateHomeworkDto,
            Message,
            SendMessageDto,
            ConversationSummary,
            StatusResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Status", description = "Service status"),
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Students", description = "Student records and attendance"),
        (name = "Homework", description = "Homework per class section"),
        (name = "Messages", description = "Direct messages between users"),
        (name = "Users", description = "Profiles and passwords"),
    ),
    info(
        title = "Parent Portal API",
        version = "0.1.0",
        description = "REST API connecting parents, teachers and admins around students, homework and messages.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
