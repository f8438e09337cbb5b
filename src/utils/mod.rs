pub mod bootstrap;
pub mod exit;
pub mod random;
