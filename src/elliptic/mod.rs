pub mod curve;
pub mod isogeny;
pub mod point;
pub mod torsion;
pub mod y_only_arithmetic;
