pub mod values_map;
