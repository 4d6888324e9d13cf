pub mod inject;
pub mod relay;
pub mod response;
pub mod security;
