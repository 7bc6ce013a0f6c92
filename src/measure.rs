//! Measurement formatting patterns.
//!
//! Measure data does not come from the main locale source. It lives in a
//! side file mapping a locale tag to a bracketed, comma-separated list of
//! quoted pattern fields:
//!
//! ```text
//! # tag  [field, field, ...]
//! en ["1", "hour", "{0} {1}", "10", "{0}h", ...]
//! ```
//!
//! [`MeasureTable`] loads that file and joins each list into the single
//! delimited string stored as the measure category's raw value. At emission
//! time [`MeasureFormat`] parses the delimited string back into a nested
//! per-unit, per-width, per-plural-form structure.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::BuildError;
use crate::locale::{LocaleTag, FIELD_SEP};

/// Width classes of a measure pattern, in field order.
pub const WIDTHS: [&str; 4] = ["narrow", "short", "long", "full"];

/// Plural forms within one width, in field order.
pub const PLURAL_FORMS: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// Fields consumed by one unit: every width crossed with every plural form.
pub const FIELDS_PER_UNIT: usize = WIDTHS.len() * PLURAL_FORMS.len();

/// Leading fields before any unit data: unit_num, unit_set, pattern, order.
pub const HEADER_FIELDS: usize = 4;

/// Per-locale measure pattern values loaded from the side file.
#[derive(Debug, Default)]
pub struct MeasureTable {
    values: BTreeMap<String, String>,
}

impl MeasureTable {
    /// Reads the measure side file.
    ///
    /// Blank lines and `#` comments are skipped. Every other line must be a
    /// valid locale tag followed by a bracketed list of quoted fields; a
    /// malformed line aborts the build with its line number.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let raw = fs::read_to_string(path).map_err(|source| BuildError::MeasureRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut values = BTreeMap::new();
        for (number, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parse_error = || BuildError::MeasureParse {
                path: path.to_path_buf(),
                line: number + 1,
            };

            let (tag_part, list_part) =
                line.split_once(char::is_whitespace).ok_or_else(parse_error)?;
            let tag = LocaleTag::parse(tag_part).map_err(|_| parse_error())?;

            let fields: Vec<String> =
                serde_json::from_str(list_part.trim()).map_err(|_| parse_error())?;

            values.insert(tag.to_string(), join_fields(&fields));
        }

        debug!(
            "Loaded measure patterns for {} locales from {}",
            values.len(),
            path.display()
        );

        Ok(MeasureTable { values })
    }

    /// The delimited measure value for `tag`, empty when the file has none.
    pub fn value_for(&self, tag: &LocaleTag) -> String {
        self.values.get(&tag.to_string()).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn join_fields(fields: &[String]) -> String {
    fields.join(&FIELD_SEP.to_string())
}

/// One locale's measure data, parsed out of the delimited raw value.
#[derive(Debug, PartialEq, Eq)]
pub struct MeasureFormat {
    unit_num: String,
    unit_set: String,
    pattern: String,
    order: String,
    units: Vec<MeasureUnit>,
}

/// Pattern strings for one unit: `patterns[width][plural_form]`.
#[derive(Debug, PartialEq, Eq)]
struct MeasureUnit {
    name: String,
    patterns: Vec<Vec<String>>,
}

impl MeasureFormat {
    /// Parses a delimited measure value positionally.
    ///
    /// The value must hold exactly `HEADER_FIELDS + unit_num * FIELDS_PER_UNIT`
    /// fields, and `unit_set` must name exactly `unit_num` whitespace-separated
    /// units. Anything else returns `None`; the caller decides how loudly to
    /// drop the locale.
    pub fn parse(raw: &str) -> Option<MeasureFormat> {
        if raw.is_empty() {
            return None;
        }

        let fields: Vec<&str> = raw.split(FIELD_SEP).collect();
        if fields.len() < HEADER_FIELDS {
            return None;
        }

        let unit_count: usize = fields[0].parse().ok()?;
        let expected = unit_count
            .checked_mul(FIELDS_PER_UNIT)
            .and_then(|n| n.checked_add(HEADER_FIELDS))?;
        if fields.len() != expected {
            return None;
        }

        let names: Vec<&str> = fields[1].split_whitespace().collect();
        if names.len() != unit_count {
            return None;
        }

        let mut units = Vec::with_capacity(unit_count);
        let mut cursor = HEADER_FIELDS;
        for name in names {
            let mut patterns = Vec::with_capacity(WIDTHS.len());
            for _ in WIDTHS {
                let forms: Vec<String> = fields[cursor..cursor + PLURAL_FORMS.len()]
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                patterns.push(forms);
                cursor += PLURAL_FORMS.len();
            }
            units.push(MeasureUnit {
                name: name.to_string(),
                patterns,
            });
        }

        Some(MeasureFormat {
            unit_num: fields[0].to_string(),
            unit_set: fields[1].to_string(),
            pattern: fields[2].to_string(),
            order: fields[3].to_string(),
            units,
        })
    }

    /// Renders the nested JSON object emitted for one locale.
    pub fn to_json(&self) -> Value {
        let mut units = Map::new();
        for unit in &self.units {
            let mut widths = Map::new();
            for (width, forms) in WIDTHS.iter().zip(&unit.patterns) {
                let forms: Vec<Value> = forms.iter().map(|f| Value::String(f.clone())).collect();
                widths.insert(width.to_string(), Value::Array(forms));
            }
            units.insert(unit.name.clone(), Value::Object(widths));
        }

        let mut object = Map::new();
        object.insert("unit_num".to_string(), Value::String(self.unit_num.clone()));
        object.insert("unit_set".to_string(), Value::String(self.unit_set.clone()));
        object.insert("pattern".to_string(), Value::String(self.pattern.clone()));
        object.insert("order".to_string(), Value::String(self.order.clone()));
        object.insert("units".to_string(), Value::Object(units));
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a well-formed delimited value for `unit_count` units.
    fn sample_value(unit_count: usize) -> String {
        let names: Vec<String> = (0..unit_count).map(|i| format!("unit{i}")).collect();
        let mut fields = vec![
            unit_count.to_string(),
            names.join(" "),
            "{0} {1}".to_string(),
            "10".to_string(),
        ];
        for name in &names {
            for width in WIDTHS {
                for form in PLURAL_FORMS {
                    fields.push(format!("{name}-{width}-{form}"));
                }
            }
        }
        fields.join("_")
    }

    // ==================== MeasureFormat Parsing Tests ====================

    #[test]
    fn test_parse_two_units() {
        let format = MeasureFormat::parse(&sample_value(2)).expect("value should parse");
        let json = format.to_json();

        let units = json["units"].as_object().unwrap();
        assert_eq!(units.len(), 2);
        for unit in units.values() {
            let widths = unit.as_object().unwrap();
            assert_eq!(widths.len(), 4);
            for forms in widths.values() {
                assert_eq!(forms.as_array().unwrap().len(), 6);
            }
        }
    }

    #[test]
    fn test_parse_consumes_exact_field_count() {
        let value = sample_value(2);
        assert_eq!(
            value.split('_').count(),
            HEADER_FIELDS + 2 * FIELDS_PER_UNIT
        );
        assert!(MeasureFormat::parse(&value).is_some());
    }

    #[test]
    fn test_parse_keeps_field_positions() {
        let format = MeasureFormat::parse(&sample_value(1)).unwrap();
        let json = format.to_json();
        assert_eq!(json["unit_num"], "1");
        assert_eq!(json["unit_set"], "unit0");
        assert_eq!(json["pattern"], "{0} {1}");
        assert_eq!(json["order"], "10");
        assert_eq!(json["units"]["unit0"]["narrow"][0], "unit0-narrow-zero");
        assert_eq!(json["units"]["unit0"]["full"][5], "unit0-full-other");
    }

    #[test]
    fn test_parse_rejects_empty_value() {
        assert!(MeasureFormat::parse("").is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let mut value = sample_value(2);
        value.push_str("_extra");
        assert!(MeasureFormat::parse(&value).is_none());
    }

    #[test]
    fn test_parse_rejects_non_numeric_unit_num() {
        let value = sample_value(1).replacen('1', "one", 1);
        assert!(MeasureFormat::parse(&value).is_none());
    }

    #[test]
    fn test_parse_rejects_huge_unit_count() {
        // The expected-field arithmetic must not wrap for counts near
        // usize::MAX; a count no field list can satisfy is a mismatch.
        let count = usize::MAX / FIELDS_PER_UNIT + 1;
        assert!(MeasureFormat::parse(&format!("{count}_a_b_c")).is_none());
    }

    #[test]
    fn test_parse_rejects_unit_set_count_mismatch() {
        let value = sample_value(2).replace("unit0 unit1", "unit0");
        assert!(MeasureFormat::parse(&value).is_none());
    }

    // ==================== MeasureTable Tests ====================

    fn write_table(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("measure_patterns.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_table_joins_fields_with_separator() {
        let (_dir, path) = write_table("en [\"1\", \"hour\", \"{0} {1}\", \"10\"]\n");
        let table = MeasureTable::load(&path).unwrap();
        let tag = LocaleTag::parse("en").unwrap();
        assert_eq!(table.value_for(&tag), "1_hour_{0} {1}_10");
    }

    #[test]
    fn test_table_skips_comments_and_blanks() {
        let (_dir, path) = write_table("# patterns\n\nen [\"1\"]\n");
        let table = MeasureTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_normalizes_tags() {
        let (_dir, path) = write_table("zh_hans [\"1\"]\n");
        let table = MeasureTable::load(&path).unwrap();
        let tag = LocaleTag::parse("zh-Hans").unwrap();
        assert_eq!(table.value_for(&tag), "1");
    }

    #[test]
    fn test_table_missing_locale_is_empty() {
        let (_dir, path) = write_table("en [\"1\"]\n");
        let table = MeasureTable::load(&path).unwrap();
        let tag = LocaleTag::parse("fr").unwrap();
        assert_eq!(table.value_for(&tag), "");
    }

    #[test]
    fn test_table_reports_malformed_line_number() {
        let (_dir, path) = write_table("en [\"1\"]\nfr not-a-list\n");
        match MeasureTable::load(&path) {
            Err(BuildError::MeasureParse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MeasureParse, got {other:?}"),
        }
    }

    #[test]
    fn test_table_rejects_invalid_tag() {
        let (_dir, path) = write_table("not/a/tag [\"1\"]\n");
        assert!(matches!(
            MeasureTable::load(&path),
            Err(BuildError::MeasureParse { line: 1, .. })
        ));
    }

    #[test]
    fn test_table_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = MeasureTable::load(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(BuildError::MeasureRead { .. })));
    }
}
