//! # Parent Portal Models
//!
//! Domain models and DTOs for the Parent Portal API.
//!
//! This crate provides the data structures shared by the server, the CLI and
//! the client library: database entities, request/response DTOs and their
//! validation rules. All JSON is camelCase on the wire.
//!
//! # Modules
//!
//! - [`auth`]: Login, registration and token responses
//! - [`users`]: User profiles, profile and password updates
//! - [`students`]: Students and attendance counters
//! - [`homework`]: Homework assignments
//! - [`messages`]: Direct messages
//! - [`conversations`]: Mailbox grouping of messages by user pair
//!
//! # Example
//!
//! ```ignore
//! use parent_portal_models::conversations::mailbox;
//! use parent_portal_models::messages::Message;
//!
//! let summaries = mailbox(&messages, viewer_id);
//! for summary in summaries {
//!     println!("{}: {} unread", summary.counterpart_name, summary.unread_count);
//! }
//! ```

pub mod auth;
pub mod conversations;
pub mod homework;
pub mod messages;
pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};

pub use users::{ChangePasswordDto, UpdateProfileDto, User, UserSummary};

pub use students::{
    Attendance, AttendanceUpdateDto, CreateStudentDto, InitialAttendance, Student, StudentQuery,
};

pub use homework::{CreateHomeworkDto, Homework, HomeworkQuery};

pub use messages::{Message, SendMessageDto};

pub use conversations::{ConversationKey, ConversationSummary, group_by_conversation, mailbox};
