pub mod dataset;
pub mod health;
pub mod history;
pub mod info;
pub mod map;
pub mod predict;
