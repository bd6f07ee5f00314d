mod auth_client;

pub use auth_client::AuthClient;
