pub mod aggregate;
pub mod board;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod models;
pub mod ordering;
pub mod storage;
pub mod store;
pub mod validation;

pub use aggregate::{average_rating, RatingSummary};
pub use board::ReviewBoard;
pub use config::{Config, CorruptionPolicy, StoreConfig};
pub use error::{StoreError, SubmitError};
pub use form::ReviewForm;
pub use models::*;
pub use ordering::{NewestFirst, OrderingPolicy};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::ReviewStore;
pub use validation::validate;
