pub mod states;
pub mod params;
pub mod engine;
pub mod flow;
pub mod influence;
pub mod relaxation;
pub mod scenario;
