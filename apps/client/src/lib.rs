pub mod api_client;
pub mod config;
pub mod errors;
pub mod forms;
pub mod listing;
pub mod lookup;
pub mod models;
pub mod notice;
pub mod session;
pub mod state;

pub use errors::ClientError;
pub use notice::{Notice, NoticeLevel};
pub use state::ClientState;
