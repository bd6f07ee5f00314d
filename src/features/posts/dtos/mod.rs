mod post_dto;

pub use post_dto::{CreatePostPayload, UpdatePostPayload};
