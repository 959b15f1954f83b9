pub mod entity;
pub mod kind;
