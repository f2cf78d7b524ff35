pub mod histogram;
pub mod normalize;
pub mod ntuple;
pub mod serialization;
pub mod writer;
