//! Catalog filter engine.
//!
//! A pure, single-pass predicate over an in-memory product snapshot: the
//! browse view fetches the full list once and narrows it locally as the
//! shopper adjusts criteria. No network access, no mutation of the input,
//! relative order always preserved.
//!
//! Text search has two mutually exclusive modes: a non-empty product-ID
//! query takes sole precedence and the name/description term is ignored;
//! otherwise the term matches name OR description. Category, brand, and
//! price predicates apply conjunctively on top of either mode.

use rust_decimal::Decimal;

use crate::shop::types::Product;

// =============================================================================
// Criteria
// =============================================================================

/// Price range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    /// No price filtering.
    #[default]
    Any,
    /// Inclusive range: `min <= price <= max`.
    Between(Decimal, Decimal),
    /// Unbounded above: `price >= min` (the "5000+" bucket).
    AtLeast(Decimal),
}

impl PriceRange {
    /// Whether a price falls inside this range.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        match *self {
            Self::Any => true,
            Self::Between(min, max) => price >= min && price <= max,
            Self::AtLeast(min) => price >= min,
        }
    }

    /// Parse a range from the UI's `min-max` / `min` / `all` notation.
    ///
    /// `"500-1000"` is an inclusive range, a bare `"5000"` (or `"5000+"`)
    /// means at-least, and `"all"` or an empty string means no filter.
    /// Returns `None` for anything unparseable.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Some(Self::Any);
        }

        if let Some((min, max)) = s.split_once('-') {
            let min = min.trim().parse::<Decimal>().ok()?;
            let max = max.trim().parse::<Decimal>().ok()?;
            return Some(Self::Between(min, max));
        }

        let min = s.trim_end_matches('+').trim().parse::<Decimal>().ok()?;
        Some(Self::AtLeast(min))
    }
}

/// The shopper's current filter and search selections.
///
/// Created fresh per browse session, mutated field-by-field as the shopper
/// interacts, and reset on explicit clear. `None` for category or brand
/// means "all".
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Category name to match, or `None` for all categories.
    pub category: Option<String>,
    /// Brand name to match, or `None` for all brands.
    pub brand: Option<String>,
    /// Price range selection.
    pub price: PriceRange,
    /// Name/description search term. Ignored while `product_id_query` is set.
    pub search_term: String,
    /// Product-ID substring query. Takes sole precedence over `search_term`.
    pub product_id_query: String,
}

impl FilterCriteria {
    /// Reset every selection back to "show everything".
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Apply `criteria` to `all_products`, returning the retained products.
///
/// Pure and deterministic: the input is never mutated and the output
/// preserves the input's relative order. An empty result is a valid
/// outcome, not an error.
#[must_use]
pub fn filter_products(all_products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let id_query = criteria.product_id_query.trim();
    let search_term = criteria.search_term.trim();

    all_products
        .iter()
        .filter(|product| {
            // Mutually exclusive text-search modes: a product-ID query wins
            // outright and the search term is ignored for this pass
            if !id_query.is_empty() {
                if !contains_ci(product.product_id.as_str(), id_query) {
                    return false;
                }
            } else if !search_term.is_empty()
                && !contains_ci(&product.product_name, search_term)
                && !contains_ci(&product.description, search_term)
            {
                return false;
            }

            if let Some(category) = &criteria.category {
                // A product without a category never matches a specific one
                if !product
                    .category_name
                    .as_deref()
                    .is_some_and(|name| eq_ci(name, category))
                {
                    return false;
                }
            }

            if let Some(brand) = &criteria.brand {
                if !product
                    .brand
                    .as_deref()
                    .is_some_and(|name| eq_ci(name, brand))
                {
                    return false;
                }
            }

            criteria.price.contains(product.price)
        })
        .cloned()
        .collect()
}

/// Distinct brand values across the full product set, offered as filter
/// options: order of first appearance, duplicates removed, empty or missing
/// brands excluded.
#[must_use]
pub fn distinct_brands(products: &[Product]) -> Vec<String> {
    let mut brands: Vec<String> = Vec::new();
    for product in products {
        if let Some(brand) = product.brand.as_deref()
            && !brand.is_empty()
            && !brands.iter().any(|seen| seen == brand)
        {
            brands.push(brand.to_string());
        }
    }
    brands
}

/// Case-insensitive equality.
fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring containment.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fashionhub_core::ProductId;

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product {
            product_id: ProductId::new(id),
            product_name: name.to_string(),
            description: String::new(),
            price: Decimal::from(price),
            original_price: None,
            discount_percent: 0,
            category_name: Some("Men".to_string()),
            brand: Some("Arrow".to_string()),
            quantity_in_stock: 1,
            image_url: None,
            sizes: Vec::new(),
            offers: Vec::new(),
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.product_id.as_str()).collect()
    }

    #[test]
    fn empty_criteria_is_identity() {
        let all = vec![
            product("P1", "Shirt", 400),
            product("P2", "Jeans", 900),
            product("P3", "Jacket", 1500),
        ];
        let result = filter_products(&all, &FilterCriteria::default());
        assert_eq!(ids(&result), ids(&all));
    }

    #[test]
    fn filtering_is_idempotent() {
        let all = vec![
            product("P1", "Shirt", 400),
            product("P2", "Jeans", 900),
            product("P3", "Shirt Dress", 1500),
        ];
        let criteria = FilterCriteria {
            search_term: "shirt".to_string(),
            ..Default::default()
        };
        let once = filter_products(&all, &criteria);
        let twice = filter_products(&once, &criteria);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn id_query_takes_sole_precedence_over_search_term() {
        let all = vec![
            product("P7", "Socks", 100),
            product("P2", "Shirt", 400),
        ];
        let criteria = FilterCriteria {
            search_term: "shirt".to_string(),
            product_id_query: "7".to_string(),
            ..Default::default()
        };
        // Only the ID predicate applies; "Shirt" does not survive
        let result = filter_products(&all, &criteria);
        assert_eq!(ids(&result), vec!["P7"]);
    }

    #[test]
    fn id_query_is_case_insensitive_substring() {
        let all = vec![product("P10", "Cap", 100), product("Q3", "Hat", 100)];
        let criteria = FilterCriteria {
            product_id_query: "p1".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&all, &criteria)), vec!["P10"]);
    }

    #[test]
    fn whitespace_only_queries_are_ignored() {
        let all = vec![product("P1", "Shirt", 400)];
        let criteria = FilterCriteria {
            search_term: "   ".to_string(),
            product_id_query: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_products(&all, &criteria).len(), 1);
    }

    #[test]
    fn search_term_matches_name_or_description() {
        let mut dress = product("P2", "Evening Gown", 2000);
        dress.description = "A flowing shirt-style dress".to_string();
        let all = vec![product("P1", "Shirt", 400), dress, product("P3", "Jeans", 900)];

        let criteria = FilterCriteria {
            search_term: "SHIRT".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&all, &criteria)), vec!["P1", "P2"]);
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let mut women = product("P2", "Dress", 900);
        women.category_name = Some("women".to_string());
        let all = vec![product("P1", "Shirt", 400), women];

        let criteria = FilterCriteria {
            category: Some("WOMEN".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&all, &criteria)), vec!["P2"]);
    }

    #[test]
    fn missing_category_or_brand_never_matches() {
        let mut bare = product("P1", "Mystery Item", 100);
        bare.category_name = None;
        bare.brand = None;
        let all = vec![bare];

        let by_category = FilterCriteria {
            category: Some("Men".to_string()),
            ..Default::default()
        };
        assert!(filter_products(&all, &by_category).is_empty());

        let by_brand = FilterCriteria {
            brand: Some("Arrow".to_string()),
            ..Default::default()
        };
        assert!(filter_products(&all, &by_brand).is_empty());
    }

    #[test]
    fn price_range_bounds_are_inclusive() {
        let all = vec![
            product("P1", "Belt", 500),
            product("P2", "Bag", 1000),
            product("P3", "Coat", 1001),
        ];
        let criteria = FilterCriteria {
            price: PriceRange::Between(Decimal::from(500), Decimal::from(1000)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&all, &criteria)), vec!["P1", "P2"]);
    }

    #[test]
    fn price_range_scenario() {
        // L = [P1@400, P2@900, P3@1500], range (500, 1000) -> [P2]
        let all = vec![
            product("P1", "A", 400),
            product("P2", "B", 900),
            product("P3", "C", 1500),
        ];
        let criteria = FilterCriteria {
            price: PriceRange::Between(Decimal::from(500), Decimal::from(1000)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&all, &criteria)), vec!["P2"]);
    }

    #[test]
    fn at_least_range_is_unbounded_above() {
        let all = vec![product("P1", "A", 4999), product("P2", "B", 5000)];
        let criteria = FilterCriteria {
            price: PriceRange::AtLeast(Decimal::from(5000)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&all, &criteria)), vec!["P2"]);
    }

    #[test]
    fn predicates_conjoin() {
        let mut zara = product("P2", "Shirt", 900);
        zara.brand = Some("Zara".to_string());
        let all = vec![product("P1", "Shirt", 900), zara, product("P3", "Shirt", 2000)];

        let criteria = FilterCriteria {
            search_term: "shirt".to_string(),
            brand: Some("zara".to_string()),
            price: PriceRange::Between(Decimal::from(500), Decimal::from(1000)),
            ..Default::default()
        };
        assert_eq!(ids(&filter_products(&all, &criteria)), vec!["P2"]);
    }

    #[test]
    fn empty_result_is_valid() {
        let all = vec![product("P1", "Shirt", 400)];
        let criteria = FilterCriteria {
            search_term: "spacesuit".to_string(),
            ..Default::default()
        };
        assert!(filter_products(&all, &criteria).is_empty());
    }

    #[test]
    fn clear_resets_to_identity() {
        let all = vec![product("P1", "Shirt", 400), product("P2", "Jeans", 900)];
        let mut criteria = FilterCriteria {
            search_term: "shirt".to_string(),
            price: PriceRange::AtLeast(Decimal::from(5000)),
            ..Default::default()
        };
        criteria.clear();
        assert_eq!(filter_products(&all, &criteria).len(), 2);
    }

    #[test]
    fn distinct_brands_first_appearance_no_blanks() {
        let mut b = product("P2", "B", 100);
        b.brand = Some("Zara".to_string());
        let mut c = product("P3", "C", 100);
        c.brand = None;
        let mut d = product("P4", "D", 100);
        d.brand = Some(String::new());
        let all = vec![product("P1", "A", 100), b, c, d, product("P5", "E", 100)];

        assert_eq!(distinct_brands(&all), vec!["Arrow", "Zara"]);
    }

    #[test]
    fn price_range_parse_notation() {
        assert_eq!(PriceRange::parse("all"), Some(PriceRange::Any));
        assert_eq!(PriceRange::parse(""), Some(PriceRange::Any));
        assert_eq!(
            PriceRange::parse("500-1000"),
            Some(PriceRange::Between(Decimal::from(500), Decimal::from(1000)))
        );
        assert_eq!(
            PriceRange::parse("5000"),
            Some(PriceRange::AtLeast(Decimal::from(5000)))
        );
        assert_eq!(
            PriceRange::parse("5000+"),
            Some(PriceRange::AtLeast(Decimal::from(5000)))
        );
        assert_eq!(PriceRange::parse("cheap"), None);
    }
}
