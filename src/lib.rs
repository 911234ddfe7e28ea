pub mod api;
pub mod chat;
pub mod db;
pub mod models;
pub mod notes;
