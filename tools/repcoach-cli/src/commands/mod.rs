pub mod analyze;
pub mod exercises;
pub mod instructions;
pub mod synth;
