pub mod fire_map;
