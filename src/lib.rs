pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod events;
pub mod history;
pub mod models;
pub mod output;
pub mod rewards;
pub mod staff;
pub mod state;
pub mod store;
pub mod timer;
