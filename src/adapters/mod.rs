pub mod shopify;
pub mod snapshot;
