// ============================================================
// AUDIENCE FILTER
// ============================================================
// Narrow a catalog to English-language, free-of-charge apps

use crate::domain::catalog::Dataset;
use crate::domain::error::Result;

/// Non-ASCII characters tolerated in an English name
/// Leaves room for emoji and symbols like ™
pub const MAX_NON_ASCII_CHARS: usize = 3;

/// Heuristic English check: at most `max_non_ascii` characters above code point 127
///
/// Names written mostly in another script are rejected. A name with a handful
/// of non-Latin characters still passes, and one with many emoji does not.
pub fn is_english_with(name: &str, max_non_ascii: usize) -> bool {
    name.chars().filter(|c| (*c as u32) > 127).count() <= max_non_ascii
}

pub fn is_english(name: &str) -> bool {
    is_english_with(name, MAX_NON_ASCII_CHARS)
}

/// Keep rows whose name passes the English heuristic
pub fn filter_english(dataset: &Dataset, name_column: usize, max_non_ascii: usize) -> Result<Dataset> {
    let mut english = Vec::new();
    for row in &dataset.rows {
        if is_english_with(row.field(name_column)?, max_non_ascii) {
            english.push(row.clone());
        }
    }
    Ok(dataset.with_rows(english))
}

/// Keep rows whose price field is exactly the free-price literal
pub fn filter_free(dataset: &Dataset, price_column: usize, free_price: &str) -> Result<Dataset> {
    let mut free = Vec::new();
    for row in &dataset.rows {
        if row.field(price_column)? == free_price {
            free.push(row.clone());
        }
    }
    Ok(dataset.with_rows(free))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AppRow, Storefront};

    #[test]
    fn test_is_english() {
        assert!(is_english("Instagram"));
        assert!(is_english("Docs To Go™ Free Office Suite"));
        assert!(is_english("Instachat 😜"));
        assert!(!is_english("爱奇艺PPS -《欢乐颂2》电视剧热播"));
        assert!(!is_english("中国語 AQリスニング"));
    }

    #[test]
    fn test_english_threshold_is_inclusive() {
        assert!(is_english("abc😜😜😜"));
        assert!(!is_english("abc😜😜😜😜"));
        assert!(is_english_with("ñ", 1));
        assert!(!is_english_with("ññ", 1));
    }

    fn app_store(rows: &[(&str, &str)]) -> Dataset {
        Dataset::new(
            Storefront::AppStore,
            vec!["track_name".to_string(), "price".to_string()],
            rows.iter()
                .enumerate()
                .map(|(i, (name, price))| AppRow::new(i, vec![name.to_string(), price.to_string()]))
                .collect(),
        )
    }

    #[test]
    fn test_filter_english() {
        let dataset = app_store(&[("Pandora", "0.0"), ("愛情公寓", "0.0"), ("Netflix", "0.0")]);
        let english = filter_english(&dataset, 0, MAX_NON_ASCII_CHARS).unwrap();

        assert_eq!(english.len(), 2);
        assert!(english.rows.iter().all(|r| is_english(&r.fields[0])));
    }

    #[test]
    fn test_filter_free_uses_exact_literal() {
        let dataset = app_store(&[("Pandora", "0.0"), ("Minecraft", "6.99"), ("Odd", "0")]);
        let free = filter_free(&dataset, 1, "0.0").unwrap();

        assert_eq!(free.len(), 1);
        assert!(free.rows.iter().all(|r| r.fields[1] == "0.0"));
    }

    #[test]
    fn test_filter_reports_missing_column() {
        let dataset = app_store(&[("Pandora", "0.0")]);
        assert!(filter_free(&dataset, 4, "0.0").is_err());
    }
}
