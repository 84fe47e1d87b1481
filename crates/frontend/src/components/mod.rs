pub mod filter_panel;
pub mod map_view;
pub mod risk_panel;
