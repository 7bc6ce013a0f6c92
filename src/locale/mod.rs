//! Locale model: tags, categories, and the resolved build catalog.
//!
//! Everything that defines *which* data the build produces lives here. All
//! other modules consume these types; none of them re-parse tag strings or
//! hardcode category indices.
//!
//! # Architecture
//!
//! - `tag`: Validated, normalized `language[-script][-region]` tags
//! - `category`: The fixed ordered set of formatting-data categories
//! - `catalog`: Wildcard-expanded, ordered list of locales to build
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_datagen::locale::{Category, LocaleCatalog, LocaleTag};
//!
//! let tag = LocaleTag::parse("zh_hans_cn")?;
//! assert_eq!(tag.to_string(), "zh-Hans-CN");
//!
//! let catalog = LocaleCatalog::load(&path, &available)?;
//! for slot in catalog.slots() {
//!     println!("{slot}");
//! }
//! ```

mod catalog;
mod category;
mod tag;

pub use catalog::LocaleCatalog;
pub use category::{Category, FIELD_SEP};
pub use tag::LocaleTag;
