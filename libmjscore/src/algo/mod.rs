pub mod agari;
pub mod decompose;
pub mod point;
