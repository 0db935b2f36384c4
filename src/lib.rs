pub mod aggregate;
pub mod cache;
pub mod config;
pub mod github;
pub mod i18n;
pub mod metrics;
pub mod projects;
pub mod server;
pub mod theme;
pub mod view;
