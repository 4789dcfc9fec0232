// Data-acquisition strategies, strongest first

pub mod api;
pub mod fallback;
pub mod scraping;
pub mod simulation;

pub use api::ApiStrategy;
pub use fallback::{ScrapingWithSimulationFallback, WithSimulationFallback};
pub use scraping::ScrapingStrategy;
pub use simulation::SimulationStrategy;
