mod helpers;
mod rupees;

pub mod op;
mod secret;

pub use helpers::parse_boolean_flag;
pub use rupees::Rupees;
pub use secret::Secret;
