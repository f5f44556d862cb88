pub mod campaigns;
pub mod subscriptions;
