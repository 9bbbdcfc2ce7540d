pub mod calculator;
pub mod history;

pub use calculator::{calculate, evaluate, preprocess, try_evaluate};
pub use history::HistoryStore;
