pub mod controls;
pub mod layers;
pub mod models;
pub mod regions;
pub mod risk;
pub mod tiles;
