mod advisor;
mod user_store;

pub use advisor::{Advisor, AdvisorError};
pub use user_store::{MySqlUserStore, StoreError, UserStore};
