pub mod ease;
pub mod interp;
pub mod layer;
pub mod ops;
