pub mod migrate;
pub mod types;
pub mod widgets;

pub use sqlx::postgres::PgPool;
pub use types::*;
