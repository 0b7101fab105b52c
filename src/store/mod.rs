//! Document-store collaborator and typed repositories.
//!
//! This module covers the four primitives the product uses against the
//! external document store:
//! - create-with-id
//! - point lookup by id
//! - filtered listing by equality predicates
//! - field update
//!
//! plus delete for interview cancellation. No transactions or batch writes
//! are used anywhere; aggregate reads (application counts) are best-effort
//! re-queries with no read-after-write guarantee.

pub mod applications;
pub mod error;
pub mod firestore;
pub mod interviews;
pub mod jobs;
pub mod users;
pub mod value;

pub use applications::ApplicationStore;
pub use error::{StoreError, StoreResult};
pub use firestore::{Direction, Document, DocumentClient};
pub use interviews::InterviewStore;
pub use jobs::JobStore;
pub use users::UserStore;
