//! Catalog filtering and search.

use crate::domain::aggregates::Product;

/// Filter panel state. `None` facets mean "all".
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub in_stock: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self { category: None, brand: None, min_price: 0.0, max_price: f64::INFINITY, in_stock: false }
    }
}

impl FilterCriteria {
    /// Dropdown value to facet: `"all"` and blank select everything.
    pub fn facet(value: &str) -> Option<String> {
        match value.trim() {
            "" | "all" => None,
            v => Some(v.to_string()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.category.as_deref().is_some_and(|c| c != product.category) { return false; }
        if self.brand.as_deref().is_some_and(|b| b != product.brand) { return false; }
        let Some(price) = product.numeric_price else { return false };
        let price = price as f64;
        if price < self.min_price || price > self.max_price { return false; }
        !self.in_stock || product.is_in_stock()
    }
}

/// Products passing `criteria` whose name, brand or notes contain `search`
/// (case-insensitive). Input order is kept.
pub fn filter<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    criteria: &FilterCriteria,
    search: &str,
) -> Vec<&'a Product> {
    let needle = search.trim().to_lowercase();
    products
        .into_iter()
        .filter(|p| criteria.matches(p))
        .filter(|p| needle.is_empty() || p.search_text().contains(&needle))
        .collect()
}

/// Distinct non-empty brands in first-seen order.
pub fn brands(products: &[Product]) -> Vec<&str> { distinct(products.iter().map(|p| p.brand.as_str())) }

pub fn categories(products: &[Product]) -> Vec<&str> { distinct(products.iter().map(|p| p.category.as_str())) }

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for v in values.filter(|v| !v.is_empty()) {
        if !seen.contains(&v) { seen.push(v); }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, brand: &str, category: &str, price: Option<i64>, stock: Option<u32>) -> Product {
        Product {
            id, name: name.into(), brand: brand.into(), price: String::new(), numeric_price: price, stock,
            notes: "vanilla, tonka".into(), description: String::new(), image: String::new(),
            volume: "10 ml".into(), category: category.into(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Lost Cherry", "Tom Ford", "women", Some(2500), Some(3)),
            product(2, "Aventus", "Creed", "men", Some(3200), Some(0)),
            product(3, "Tobacco Vanille", "Tom Ford", "unisex", Some(2900), None),
            product(4, "Mystery", "Creed", "men", None, Some(5)),
        ]
    }

    fn ids(found: &[&Product]) -> Vec<i64> { found.iter().map(|p| p.id).collect() }

    #[test]
    fn test_default_criteria_drop_unpriced_only() {
        let c = catalog();
        assert_eq!(ids(&filter(&c, &FilterCriteria::default(), "")), vec![1, 2, 3]);
    }

    #[test]
    fn test_facets_and_price_range() {
        let c = catalog();
        let criteria = FilterCriteria { brand: FilterCriteria::facet("Tom Ford"), ..Default::default() };
        assert_eq!(ids(&filter(&c, &criteria, "")), vec![1, 3]);
        let criteria = FilterCriteria { category: FilterCriteria::facet("men"), ..Default::default() };
        assert_eq!(ids(&filter(&c, &criteria, "")), vec![2]);
        let criteria = FilterCriteria { min_price: 2600.0, max_price: 3000.0, ..Default::default() };
        assert_eq!(ids(&filter(&c, &criteria, "")), vec![3]);
        assert_eq!(FilterCriteria::facet("all"), None);
    }

    #[test]
    fn test_in_stock_excludes_unknown_stock() {
        let c = catalog();
        let criteria = FilterCriteria { in_stock: true, ..Default::default() };
        assert_eq!(ids(&filter(&c, &criteria, "")), vec![1]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let c = catalog();
        let all = FilterCriteria::default();
        assert_eq!(ids(&filter(&c, &all, "TOM")), vec![1, 3]);
        assert_eq!(ids(&filter(&c, &all, "tonka")), vec![1, 2, 3]);
        assert!(filter(&c, &all, "oud").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let c = catalog();
        let criteria = FilterCriteria { brand: Some("Tom Ford".into()), max_price: 2600.0, ..Default::default() };
        let once = filter(&c, &criteria, "cherry");
        let twice = filter(once.iter().copied(), &criteria, "cherry");
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_brands_and_categories() {
        let c = catalog();
        assert_eq!(brands(&c), vec!["Tom Ford", "Creed"]);
        assert_eq!(categories(&c), vec!["women", "men", "unisex"]);
    }
}
