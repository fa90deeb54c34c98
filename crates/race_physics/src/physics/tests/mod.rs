//! Whole-world collision scenarios

mod world_scenarios;
