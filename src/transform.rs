use std::cmp::Ordering;

use crate::model::{PriceStats, Product, SortKey};

/// Parse a decorated price string ("¥1,000", "$23.99") by keeping only
/// digits, periods and minus signs, then reading the remainder as a float.
/// Returns None when nothing numeric is left or the remainder is malformed,
/// so callers must handle unparsable prices explicitly.
pub fn parse_price(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Parse a decorated count string ("1,234件", "12 reviews") by keeping only
/// digits. Returns None when the string contains no digits.
pub fn parse_count(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse().ok()
}

/// Sort listings by the given key without mutating the input.
///
/// `ByPrice` orders ascending on the parsed price, `ByFavoriteCount`
/// descending on the parsed favorite count. The sort is stable, and products
/// whose key fails to parse sort last under either key.
pub fn sort_products(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::ByPrice => {
            sorted.sort_by(|a, b| cmp_ascending(parse_price(&a.price), parse_price(&b.price)));
        }
        SortKey::ByFavoriteCount => {
            sorted.sort_by(|a, b| {
                cmp_descending(parse_count(&a.favorite_count), parse_count(&b.favorite_count))
            });
        }
    }
    sorted
}

fn cmp_ascending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_descending(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compute max/min/mean over the parsed prices of the given listings.
/// Unparsable prices are excluded rather than coerced to zero. Returns None
/// when no price parses at all (an empty input included), so the caller can
/// render an explicit "no data" instead of a fake number.
pub fn price_stats(products: &[Product]) -> Option<PriceStats> {
    let prices: Vec<f64> = products.iter().filter_map(|p| parse_price(&p.price)).collect();

    if prices.is_empty() {
        return None;
    }

    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut sum = 0.0;
    for &price in &prices {
        max = max.max(price);
        min = min.min(price);
        sum += price;
    }

    Some(PriceStats {
        max,
        min,
        average: sum / prices.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: &str, favorites: &str) -> Product {
        Product {
            name: name.to_string(),
            url: format!("https://minne.com/items/{}", name),
            image_url: format!("https://image.minne.com/{}.jpg", name),
            price: price.to_string(),
            rating_count: "4.5".to_string(),
            review_count: "12件".to_string(),
            favorite_count: favorites.to_string(),
        }
    }

    #[test]
    fn parse_price_strips_currency_decoration() {
        assert_eq!(parse_price("¥1,000"), Some(1000.0));
        assert_eq!(parse_price("$23.99"), Some(23.99));
        assert_eq!(parse_price("1200円"), Some(1200.0));
    }

    #[test]
    fn parse_price_rejects_non_numeric_strings() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("売り切れ"), None);
        assert_eq!(parse_price("N/A"), None);
        // Two decimal points survive the strip but do not parse.
        assert_eq!(parse_price("1.2.3"), None);
    }

    #[test]
    fn parse_count_strips_unit_suffix() {
        assert_eq!(parse_count("3件"), Some(3));
        assert_eq!(parse_count("1,234件"), Some(1234));
        assert_eq!(parse_count("12 reviews"), Some(12));
        assert_eq!(parse_count("なし"), None);
    }

    #[test]
    fn sort_by_price_is_ascending() {
        let products = vec![
            product("a", "¥3,000", "1件"),
            product("b", "¥1,000", "2件"),
            product("c", "¥2,000", "3件"),
        ];
        let sorted = sort_products(&products, SortKey::ByPrice);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn sort_by_price_is_stable_on_equal_keys() {
        let products = vec![
            product("first", "¥500", "1件"),
            product("second", "¥500", "2件"),
            product("third", "¥500", "3件"),
        ];
        let sorted = sort_products(&products, SortKey::ByPrice);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn sort_by_price_puts_unparsable_last() {
        let products = vec![
            product("broken", "売り切れ", "1件"),
            product("cheap", "¥100", "2件"),
            product("pricey", "¥900", "3件"),
        ];
        let sorted = sort_products(&products, SortKey::ByPrice);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["cheap", "pricey", "broken"]);
    }

    #[test]
    fn sort_by_favorites_is_descending() {
        let products = vec![
            product("a", "¥100", "3件"),
            product("b", "¥100", "10件"),
            product("c", "¥100", "1件"),
        ];
        let sorted = sort_products(&products, SortKey::ByFavoriteCount);
        let favorites: Vec<&str> = sorted.iter().map(|p| p.favorite_count.as_str()).collect();
        assert_eq!(favorites, ["10件", "3件", "1件"]);
    }

    #[test]
    fn sort_by_favorites_puts_unparsable_last() {
        let products = vec![
            product("a", "¥100", "なし"),
            product("b", "¥100", "5件"),
        ];
        let sorted = sort_products(&products, SortKey::ByFavoriteCount);
        assert_eq!(sorted[0].name, "b");
        assert_eq!(sorted[1].name, "a");
    }

    #[test]
    fn sort_is_idempotent_and_leaves_input_untouched() {
        let products = vec![
            product("a", "¥300", "1件"),
            product("b", "¥100", "2件"),
        ];
        let once = sort_products(&products, SortKey::ByPrice);
        let twice = sort_products(&products, SortKey::ByPrice);
        let once_names: Vec<&str> = once.iter().map(|p| p.name.as_str()).collect();
        let twice_names: Vec<&str> = twice.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(once_names, twice_names);
        // Input order is unchanged.
        assert_eq!(products[0].name, "a");
        assert_eq!(products[1].name, "b");
    }

    #[test]
    fn price_stats_computes_max_min_average() {
        let products = vec![
            product("a", "¥1,000", "1件"),
            product("b", "¥3,000", "2件"),
            product("c", "¥2,000", "3件"),
        ];
        let stats = price_stats(&products).unwrap();
        assert_eq!(stats.max, 3000.0);
        assert_eq!(stats.min, 1000.0);
        assert_eq!(format!("{:.2}", stats.average), "2000.00");
    }

    #[test]
    fn price_stats_reports_no_data_for_empty_input() {
        assert!(price_stats(&[]).is_none());
    }

    #[test]
    fn price_stats_reports_no_data_when_nothing_parses() {
        let products = vec![product("a", "売り切れ", "1件")];
        assert!(price_stats(&products).is_none());
    }

    #[test]
    fn price_stats_excludes_unparsable_prices() {
        let products = vec![
            product("a", "¥1,000", "1件"),
            product("b", "売り切れ", "2件"),
            product("c", "¥2,000", "3件"),
        ];
        let stats = price_stats(&products).unwrap();
        assert_eq!(stats.max, 2000.0);
        assert_eq!(stats.min, 1000.0);
        assert_eq!(format!("{:.2}", stats.average), "1500.00");
    }
}
