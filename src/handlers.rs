// src/handlers.rs

pub mod auth;
pub mod catalog;
pub mod categories;
pub mod contact;
pub mod orders;
pub mod products;
pub mod settings;
