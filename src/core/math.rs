pub mod angle;
pub mod transform;
