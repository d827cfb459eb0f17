pub mod gesture;
pub mod hand;
pub mod smoothing;
pub mod stroke;
