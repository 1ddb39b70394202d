use crate::utils::error::{CartError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type ProductId = u64;

/// A product as served by `GET products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub id: ProductId,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl LineItem {
    pub fn new(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Immutable snapshot of the cart.
///
/// Items keep insertion order; `index` maps each product id to its position,
/// so a cart can never hold two items with the same id. Every change goes
/// through a `with_*`/`without` method that returns a new snapshot and
/// leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
    index: HashMap<ProductId, usize>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<LineItem>) -> Result<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(CartError::InvalidAmount {
                    product_id: item.id,
                    amount: 0,
                });
            }
            if index.insert(item.id, position).is_some() {
                return Err(CartError::DuplicateItem {
                    product_id: item.id,
                });
            }
        }
        Ok(Self { items, index })
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.index.get(&id).map(|&position| &self.items[position])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item amounts.
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Appends `item` at the end of the cart.
    pub fn with_item(&self, item: LineItem) -> Result<Self> {
        if self.contains(item.id) {
            return Err(CartError::DuplicateItem {
                product_id: item.id,
            });
        }
        if item.amount == 0 {
            return Err(CartError::InvalidAmount {
                product_id: item.id,
                amount: 0,
            });
        }

        let mut next = self.clone();
        next.index.insert(item.id, next.items.len());
        next.items.push(item);
        Ok(next)
    }

    pub fn with_amount(&self, id: ProductId, amount: u32) -> Result<Self> {
        let position = *self
            .index
            .get(&id)
            .ok_or(CartError::NotInCart { product_id: id })?;
        if amount == 0 {
            return Err(CartError::InvalidAmount {
                product_id: id,
                amount: 0,
            });
        }

        let mut next = self.clone();
        next.items[position].amount = amount;
        Ok(next)
    }

    pub fn without(&self, id: ProductId) -> Result<Self> {
        if !self.contains(id) {
            return Err(CartError::NotInCart { product_id: id });
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Self::from_items(items)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// User-visible messages sent to the notifier when an operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    StockExhausted,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::StockExhausted => "Quantidade solicitada fora de estoque",
            Notice::AddFailed => "Erro na adição do produto",
            Notice::RemoveFailed => "Erro na remoção do produto",
            Notice::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ProductId, amount: u32) -> LineItem {
        LineItem {
            id,
            title: format!("Tênis {}", id),
            price: 100.0 + id as f64,
            image: format!("https://cdn.example.com/{}.jpg", id),
            amount,
        }
    }

    #[test]
    fn test_with_item_preserves_order_and_original() {
        let empty = Cart::new();
        let one = empty.with_item(item(3, 1)).unwrap();
        let two = one.with_item(item(1, 1)).unwrap();

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        let ids: Vec<ProductId> = two.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_with_item_rejects_duplicate() {
        let cart = Cart::new().with_item(item(1, 1)).unwrap();
        let err = cart.with_item(item(1, 2)).unwrap_err();
        assert!(matches!(err, CartError::DuplicateItem { product_id: 1 }));
    }

    #[test]
    fn test_with_amount() {
        let cart = Cart::from_items(vec![item(1, 1), item(2, 4)]).unwrap();
        let updated = cart.with_amount(2, 7).unwrap();

        assert_eq!(cart.get(2).unwrap().amount, 4);
        assert_eq!(updated.get(2).unwrap().amount, 7);
        assert_eq!(updated.get(1), cart.get(1));
        assert!(matches!(
            cart.with_amount(9, 1),
            Err(CartError::NotInCart { product_id: 9 })
        ));
        assert!(matches!(
            cart.with_amount(1, 0),
            Err(CartError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_without_reindexes() {
        let cart = Cart::from_items(vec![item(1, 1), item(2, 2), item(3, 3)]).unwrap();
        let removed = cart.without(1).unwrap();

        assert!(!removed.contains(1));
        assert_eq!(removed.get(3).unwrap().amount, 3);
        assert_eq!(removed.get(2).unwrap().amount, 2);
        assert!(matches!(
            removed.without(1),
            Err(CartError::NotInCart { product_id: 1 })
        ));
    }

    #[test]
    fn test_totals() {
        let cart = Cart::from_items(vec![item(1, 2), item(2, 1)]).unwrap();
        assert_eq!(cart.total_amount(), 3);
        assert!((cart.total() - (101.0 * 2.0 + 102.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_shape() {
        let cart = Cart::from_items(vec![item(1, 2)]).unwrap();
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "id": 1,
                "title": "Tênis 1",
                "price": 101.0,
                "image": "https://cdn.example.com/1.jpg",
                "amount": 2
            }])
        );

        let parsed: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_deserialize_rejects_duplicates_and_zero_amounts() {
        let duplicated = serde_json::to_string(&vec![item(1, 1), item(1, 2)]).unwrap();
        assert!(serde_json::from_str::<Cart>(&duplicated).is_err());

        let zero = serde_json::to_string(&vec![item(1, 0)]).unwrap();
        assert!(serde_json::from_str::<Cart>(&zero).is_err());
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            Notice::StockExhausted.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_ne!(Notice::AddFailed.message(), Notice::UpdateFailed.message());
    }
}
