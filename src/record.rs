//! Per-locale build record.
//!
//! One [`LocaleRecord`] exists per catalog slot. The fetch phase fills its
//! value vector; after the fetch barrier the values are treated as an
//! immutable snapshot and dedup only flips the `included` and `reserved`
//! flags that drive emission.

use crate::locale::{Category, LocaleTag};

/// Fetched values and dedup outcome for one locale.
#[derive(Debug, Clone)]
pub struct LocaleRecord {
    tag: LocaleTag,
    values: Vec<String>,
    reserved: Vec<bool>,
    included: bool,
    reserved_count: usize,
}

impl LocaleRecord {
    /// A fresh record with every category empty and nothing reserved.
    pub fn new(tag: LocaleTag) -> Self {
        LocaleRecord {
            tag,
            values: vec![String::new(); Category::COUNT],
            reserved: vec![false; Category::COUNT],
            included: true,
            reserved_count: 0,
        }
    }

    pub fn tag(&self) -> &LocaleTag {
        &self.tag
    }

    /// Stores the fetched value for one category.
    pub fn set_value(&mut self, category: Category, value: String) {
        self.values[category.index()] = value;
    }

    pub fn value(&self, category: Category) -> &str {
        &self.values[category.index()]
    }

    /// All category values in category order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether this record's values match `other` in every category.
    pub fn same_values(&self, other: &[String]) -> bool {
        self.values == other
    }

    /// Marks a category as surviving dedup.
    pub fn reserve(&mut self, category: Category) {
        let slot = &mut self.reserved[category.index()];
        if !*slot {
            *slot = true;
            self.reserved_count += 1;
        }
    }

    pub fn is_reserved(&self, category: Category) -> bool {
        self.reserved[category.index()]
    }

    /// How many categories survived dedup for this locale.
    pub fn reserved_count(&self) -> usize {
        self.reserved_count
    }

    /// Drops the whole locale from output.
    pub fn exclude(&mut self) {
        self.included = false;
    }

    pub fn is_included(&self) -> bool {
        self.included
    }
}
