pub mod conversation;
pub mod debug;
pub mod tips;
