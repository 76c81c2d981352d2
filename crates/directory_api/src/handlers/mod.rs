//! Request handlers

pub mod health;
pub mod item;
pub mod member;
pub mod team;
