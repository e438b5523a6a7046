pub mod collab;
pub mod config;
pub mod controller;
