//! Route definitions for the qcdash API.

pub mod dashboard;
pub mod health;
