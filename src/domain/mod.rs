//! Domain layer - Core business types and the store capability

pub mod error;
pub mod user;

pub use error::{DomainError, ErrorKind};
pub use user::{NewUser, Principal, PublicUser, User, UserId, UserRepository};
