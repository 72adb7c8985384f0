pub mod clip_routes;
pub mod profile_routes;
