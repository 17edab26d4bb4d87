//! Record keeping for an auto-repair shop: customers, their vehicles, a
//! catalog of billable services and repair orders whose total is derived from
//! the services they include.

pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
