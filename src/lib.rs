pub mod conf;
pub mod db;
pub mod domain;
pub mod error;
pub mod paths;
pub mod startup;
pub mod store;
pub mod trace;
pub mod views;

mod routes;

