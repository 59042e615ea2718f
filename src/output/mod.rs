pub mod metrics;
pub mod output_structs;
pub mod partitioner;
