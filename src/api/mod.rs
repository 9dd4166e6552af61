pub mod route_api;

pub use route_api::{export_results_to_json, optimize_instance, RouteOptimizationApi};
