pub mod database;
pub mod repositories;
pub mod time;
pub mod track_api;
