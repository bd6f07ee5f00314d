mod post_client;

pub use post_client::PostClient;
