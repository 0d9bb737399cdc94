//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories translate between internal row structs (`models.rs`) and
//! domain types; neither rows nor the `schema.rs` table definitions leave
//! this module. Connections come from a shared bb8 pool via `diesel-async`.
//!
//! ```ignore
//! use finance_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/finance")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_expense_repository;
mod diesel_helpers;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_expense_repository::DieselExpenseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
