//! Records owning field maps, schemas and attributes

mod character;
mod group;
mod item;
mod skill;
mod template;

pub use character::Character;
pub use group::Group;
pub use item::Item;
pub use skill::Skill;
pub use template::Template;
