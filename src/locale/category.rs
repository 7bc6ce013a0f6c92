//! The fixed, ordered set of locale-formatting categories.
//!
//! Category order is significant everywhere: it is the index into every
//! record's value vector, the fetch order inside a task, and the artifact
//! emission order. New categories append; existing positions never move.

/// Separator between fields inside a single category value.
///
/// Multi-field values (month name lists, pattern sets, measure tables) are
/// stored as one string with fields joined on this character, and split on it
/// again at emission time.
pub const FIELD_SEP: char = '_';

/// One locale-formatting category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FormatAbbrMonthNames,
    FormatAbbrDayNames,
    TimePatterns,
    DatePatterns,
    AmPmMarkers,
    PluralRules,
    NumberFormat,
    NumberDigits,
    TimeSeparator,
    DefaultHour,
    StandaloneAbbrMonthNames,
    StandaloneAbbrWeekdayNames,
    FormatWideMonthNames,
    FormatWideDayNames,
    StandaloneWideWeekdayNames,
    StandaloneWideMonthNames,
    HourMinuteSecondPatterns,
    FullMediumShortPatterns,
    ElapsedPatterns,
    WeekData,
    DecimalPluralRules,
    MeasureFormatPatterns,
}

impl Category {
    /// Every category, in canonical order.
    pub const ALL: [Category; 22] = [
        Category::FormatAbbrMonthNames,
        Category::FormatAbbrDayNames,
        Category::TimePatterns,
        Category::DatePatterns,
        Category::AmPmMarkers,
        Category::PluralRules,
        Category::NumberFormat,
        Category::NumberDigits,
        Category::TimeSeparator,
        Category::DefaultHour,
        Category::StandaloneAbbrMonthNames,
        Category::StandaloneAbbrWeekdayNames,
        Category::FormatWideMonthNames,
        Category::FormatWideDayNames,
        Category::StandaloneWideWeekdayNames,
        Category::StandaloneWideMonthNames,
        Category::HourMinuteSecondPatterns,
        Category::FullMediumShortPatterns,
        Category::ElapsedPatterns,
        Category::WeekData,
        Category::DecimalPluralRules,
        Category::MeasureFormatPatterns,
    ];

    /// Number of categories; the length of every record's value vector.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this category in [`Category::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .expect("Category::ALL covers every variant")
    }

    /// Look a category up by its index.
    pub fn from_index(index: usize) -> Option<Category> {
        Self::ALL.get(index).copied()
    }

    /// Stable name used for artifact files and config entries.
    pub fn name(&self) -> &'static str {
        match self {
            Category::FormatAbbrMonthNames => "format_abbr_month",
            Category::FormatAbbrDayNames => "format_abbr_day",
            Category::TimePatterns => "time_patterns",
            Category::DatePatterns => "date_patterns",
            Category::AmPmMarkers => "am_pm_markers",
            Category::PluralRules => "plural_rules",
            Category::NumberFormat => "number_format",
            Category::NumberDigits => "number_digits",
            Category::TimeSeparator => "time_separator",
            Category::DefaultHour => "default_hour",
            Category::StandaloneAbbrMonthNames => "standalone_abbr_month",
            Category::StandaloneAbbrWeekdayNames => "standalone_abbr_weekday",
            Category::FormatWideMonthNames => "format_wide_month",
            Category::FormatWideDayNames => "format_wide_day",
            Category::StandaloneWideWeekdayNames => "standalone_wide_weekday",
            Category::StandaloneWideMonthNames => "standalone_wide_month",
            Category::HourMinuteSecondPatterns => "hour_minute_second_patterns",
            Category::FullMediumShortPatterns => "full_medium_short_patterns",
            Category::ElapsedPatterns => "elapsed_patterns",
            Category::WeekData => "week_data",
            Category::DecimalPluralRules => "decimal_plural_rules",
            Category::MeasureFormatPatterns => "measure_format_patterns",
        }
    }
}
