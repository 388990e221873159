pub mod stat_card;

pub use stat_card::StatCardWidget;
