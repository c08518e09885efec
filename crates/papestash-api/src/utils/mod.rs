pub mod slug;
pub mod upload;
