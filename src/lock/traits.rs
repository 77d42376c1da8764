/// Advisory lock strategy trait.
pub mod lock_strategy;
