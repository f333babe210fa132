pub mod client;
pub mod feed;
pub mod report;
pub mod tickers;

pub use client::EdgarClient;
