pub mod entity;
pub mod song;

pub use entity::{table_name_for, Entity};
pub use song::Song;
