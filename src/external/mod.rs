pub mod google_maps;
pub mod maps_links;
