pub mod api;
pub mod cards;
pub mod config;
pub mod dates;
pub mod demo_feed;
pub mod feed;
pub mod http_client;
pub mod images;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod score;
pub mod state;
