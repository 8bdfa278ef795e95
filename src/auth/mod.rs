pub mod credentials;
pub mod handlers;
pub mod session;

pub use credentials::AdminCredentials;
pub use session::SessionStore;
