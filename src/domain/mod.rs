// Domain layer - Clip bookkeeping, naming and policies

pub mod errors;
pub mod model;
pub mod naming;
pub mod rules;
