//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_audit_repository;
mod in_memory_record_repository;
mod in_memory_user_repository;
mod postgres_audit_repository;
mod postgres_record_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_record_repository::InMemoryRecordRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_record_repository::PostgresRecordRepository;
pub use postgres_user_repository::PostgresUserRepository;
