pub mod anim;
pub mod choreo;
pub mod curve;
pub mod math;
pub mod spring;
pub mod zone;
