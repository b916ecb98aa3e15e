// src/models.rs

pub mod auth;
pub mod catalog;
pub mod category;
pub mod contact;
pub mod order;
pub mod product;
pub mod settings;
