//! Mergington High School extracurricular activities service.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod web;
