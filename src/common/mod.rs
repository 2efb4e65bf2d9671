pub mod material;
pub mod solver;

pub use material::Material;
pub use solver::SolverConfig;
