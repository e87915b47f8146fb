mod item;
mod label;

pub use item::{Item, ItemType};
pub use label::humanize;
