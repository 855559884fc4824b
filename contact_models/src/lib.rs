pub mod email_address;
pub mod message;
pub mod pagination;
