// src/application/ports/mod.rs
pub mod customer_attributes;
pub mod time;

pub type CustomerAttributeApiPort = dyn customer_attributes::CustomerAttributeApi;
pub type ClockPort = dyn time::Clock;
