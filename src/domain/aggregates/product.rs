//! Product Aggregate

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{digits_only, lenient_i64, lenient_u32, parse_display_price, ProductId};
use crate::{Field, FieldError};

/// A sellable product as persisted in the catalog document.
///
/// `numeric_price` and `stock` are `None` when the stored value is not a
/// readable number; such products never pass the price filter and count as
/// out of stock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)] pub name: String,
    #[serde(default)] pub brand: String,
    /// Display price, e.g. `"1200 ₽"`.
    #[serde(default)] pub price: String,
    #[serde(default, deserialize_with = "lenient_i64")] pub numeric_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u32")] pub stock: Option<u32>,
    #[serde(default)] pub notes: String,
    #[serde(default)] pub description: String,
    #[serde(default)] pub image: String,
    #[serde(default)] pub volume: String,
    #[serde(default)] pub category: String,
}

impl Product {
    pub fn available(&self) -> u32 { self.stock.unwrap_or(0) }
    pub fn is_in_stock(&self) -> bool { self.available() > 0 }

    /// Price a new cart line snapshots.
    pub fn unit_price(&self) -> i64 {
        self.numeric_price.unwrap_or_else(|| parse_display_price(&self.price))
    }

    pub(crate) fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.brand, self.notes).to_lowercase()
    }
}

/// Admin "add product" form as submitted. Everything is raw text.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub price: String,
    /// Left blank, it is taken from the digits of `price`.
    pub numeric_price: String,
    pub stock: String,
    pub notes: String,
    pub description: String,
    pub image: String,
    pub volume: String,
    pub category: String,
}

/// A draft that passed [`ProductDraft::validate`], waiting for an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidProduct {
    name: String,
    brand: String,
    price: String,
    numeric_price: i64,
    stock: u32,
    notes: String,
    description: String,
    image: String,
    volume: String,
    category: String,
}

impl ProductDraft {
    /// Checks fields in form order and stops at the first bad one.
    pub fn validate(&self) -> Result<ValidProduct, FieldError> {
        let name = required(&self.name, Field::Name, "Enter the product name")?;
        let brand = required(&self.brand, Field::Brand, "Enter the product brand")?;

        let price = self.price.trim();
        let numeric_price = match self.numeric_price.trim() {
            "" => digits_only(price).parse::<i64>().ok(),
            raw => raw.parse::<i64>().ok(),
        };
        let numeric_price = match numeric_price {
            Some(n) if n > 0 && !price.is_empty() => n,
            _ => return Err(FieldError::new(Field::Price, "Enter a valid price")),
        };

        let stock = self.stock.trim().parse::<u32>()
            .map_err(|_| FieldError::new(Field::Stock, "Enter a valid stock quantity"))?;

        let image = required(&self.image, Field::Image, "Enter the image URL")?;
        let volume = required(&self.volume, Field::Volume, "Enter the product volume")?;
        let category = required(&self.category, Field::Category, "Choose a product category")?;

        Ok(ValidProduct {
            name, brand, price: price.to_string(), numeric_price, stock,
            notes: self.notes.trim().to_string(), description: self.description.trim().to_string(),
            image, volume, category,
        })
    }
}

impl ValidProduct {
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id, name: self.name, brand: self.brand, price: self.price,
            numeric_price: Some(self.numeric_price), stock: Some(self.stock),
            notes: self.notes, description: self.description, image: self.image,
            volume: self.volume, category: self.category,
        }
    }
}

fn required(value: &str, field: Field, message: &str) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() { return Err(FieldError::new(field, message)); }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Baccarat Rouge 540".into(), brand: "Maison Francis Kurkdjian".into(),
            price: "1 200 ₽".into(), numeric_price: String::new(), stock: "3".into(),
            notes: "saffron, amber".into(), description: String::new(),
            image: "https://img.example/br540.jpg".into(), volume: "10 ml".into(), category: "unisex".into(),
        }
    }

    #[test]
    fn test_valid_draft_fills_numeric_price() {
        let p = draft().validate().unwrap().into_product(42);
        assert_eq!(p.id, 42);
        assert_eq!(p.numeric_price, Some(1200));
        assert_eq!(p.stock, Some(3));
        assert_eq!(p.unit_price(), 1200);
    }

    #[test]
    fn test_first_failure_wins() {
        let d = ProductDraft { name: "  ".into(), brand: String::new(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Name);
        let d = ProductDraft { brand: String::new(), image: String::new(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Brand);
    }

    #[test]
    fn test_price_and_stock_rules() {
        let d = ProductDraft { numeric_price: "0".into(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Price);
        let d = ProductDraft { price: "free".into(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Price);
        let d = ProductDraft { stock: "-1".into(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Stock);
        let d = ProductDraft { stock: "many".into(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Stock);
        let d = ProductDraft { stock: "0".into(), ..draft() };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_remaining_required_fields() {
        let d = ProductDraft { image: String::new(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Image);
        let d = ProductDraft { volume: String::new(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Volume);
        let d = ProductDraft { category: String::new(), ..draft() };
        assert_eq!(d.validate().unwrap_err().field, Field::Category);
    }

    #[test]
    fn test_lenient_persisted_numbers() {
        let raw = r#"{"id":1,"name":"A","numericPrice":"abc","stock":"5"}"#;
        let p: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(p.numeric_price, None);
        assert_eq!(p.stock, Some(5));
        let raw = r#"{"id":2,"name":"B","numericPrice":900,"stock":null,"price":"950 ₽"}"#;
        let p: Product = serde_json::from_str(raw).unwrap();
        assert!(!p.is_in_stock());
        assert_eq!(p.unit_price(), 900);
    }
}
