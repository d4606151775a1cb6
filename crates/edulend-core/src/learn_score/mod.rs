pub mod activity;
pub mod aggregate;
pub mod assessment;
pub mod components;
pub mod grade;
pub mod rates;
pub mod risk;
