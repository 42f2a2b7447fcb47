//! Domain types for Reel

mod ids;
mod item;
mod media;

pub use ids::ItemId;
pub use item::CatalogItem;
pub use media::MediaKind;
