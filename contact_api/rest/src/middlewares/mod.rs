pub mod client_ip;
pub mod trace;
