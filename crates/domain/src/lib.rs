//! Pure domain types and rules for Bridgeworks.

#![forbid(unsafe_code)]

mod password;
mod user;

pub use password::{
    PasswordRequirements, PasswordStrength, UserContext, evaluate_password, strength_color,
    strength_label, strength_percent,
};
pub use user::{EmailAddress, UserId};
