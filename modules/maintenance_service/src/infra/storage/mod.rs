//! Storage layer - database entities and configuration providers

pub mod entity;
pub mod mapper;
pub mod memory;
pub mod migrations;
pub mod repositories;
