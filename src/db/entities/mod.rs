//! SeaORM entities for the `clips`, `tags` and `profiles` tables.

pub mod clip;
pub mod profile;
pub mod tag;

pub mod prelude {
    pub use super::clip::Entity as Clip;
    pub use super::clip::Model as ClipModel;
    pub use super::clip::ActiveModel as ClipActiveModel;
    pub use super::clip::Column as ClipColumn;

    pub use super::tag::Entity as Tag;
    pub use super::tag::Model as TagModel;
    pub use super::tag::ActiveModel as TagActiveModel;
    pub use super::tag::Column as TagColumn;

    pub use super::profile::Entity as Profile;
    pub use super::profile::Model as ProfileModel;
    pub use super::profile::Column as ProfileColumn;
}
