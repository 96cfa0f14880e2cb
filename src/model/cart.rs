use serde::{Deserialize, Serialize};

use super::catalog::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    /// Product as it looked when the cart was fetched.
    pub product: Product,
}

impl CartItem {
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// The buyer's server-side cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(0, u64::saturating_add)
    }

    pub fn item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let cart: Cart = serde_json::from_str(&format!(
            r#"{{"items":[
                {{"_id":"i-1","productId":"p-1","quantity":3,
                  "product":{{"_id":"p-1","title":"Frame","price":{max},"stock":9,"kind":"PART"}}}},
                {{"_id":"i-2","productId":"p-2","quantity":1,
                  "product":{{"_id":"p-2","title":"Bell","price":250,"stock":9,"kind":"PART"}}}}
            ]}}"#,
            max = u64::MAX
        ))
        .unwrap();

        assert_eq!(cart.items[0].line_total(), u64::MAX);
        assert_eq!(cart.total(), u64::MAX);
    }

    #[test]
    fn total_sums_line_totals() {
        let cart: Cart = serde_json::from_str(
            r#"{"items":[{"_id":"i-1","productId":"p-1","quantity":2,
                "product":{"_id":"p-1","title":"Tube","price":450,"stock":9,"kind":"PART"}}]}"#,
        )
        .unwrap();
        assert_eq!(cart.total(), 900);
    }
}
