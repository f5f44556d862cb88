pub mod billing_subscriptions;
mod configuration;
pub mod recipient_counts;
pub mod repository;
