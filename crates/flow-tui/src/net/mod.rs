mod client;

pub use client::SolverClient;
