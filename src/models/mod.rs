pub mod application;

pub use application::{Application, ApplicationCreate, ApplicationStatus, ApplicationUpdate};
