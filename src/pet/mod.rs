//! The fox itself
//!
//! Behaviour state machine and the first-run greeting dialogue.

pub mod behavior;
pub mod onboarding;

pub use behavior::{Direction, PetBrain, PetEffect, PetSprite, PetState};
