use crate::core::{Cart, Catalog, LineItem, Notice, Notifier, ProductId, Storage};
use crate::utils::error::{CartError, Result};

pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Requested quantity change for one product.
///
/// `amount` is signed because it comes straight from user input; values
/// below one are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountUpdate {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Owns the current cart snapshot and applies validated, persisted changes to it.
///
/// Every operation builds a new snapshot from the current one, writes it to
/// storage and only then installs it. When anything fails the matching
/// [`Notice`] is sent to the notifier and both the in-memory cart and the
/// stored copy are left as they were. The error is still returned so callers
/// can inspect it, but it has already been surfaced to the user.
pub struct CartStore<C: Catalog, S: Storage, N: Notifier> {
    catalog: C,
    storage: S,
    notifier: N,
    key: String,
    cart: Cart,
}

impl<C: Catalog, S: Storage, N: Notifier> CartStore<C, S, N> {
    /// Creates a store with an empty cart. Nothing is written until the first mutation.
    pub fn new(catalog: C, storage: S, notifier: N, key: impl Into<String>) -> Self {
        Self {
            catalog,
            storage,
            notifier,
            key: key.into(),
            cart: Cart::new(),
        }
    }

    /// Creates a store whose cart is loaded from `key` in `storage`.
    pub async fn hydrate(catalog: C, storage: S, notifier: N, key: impl Into<String>) -> Result<Self> {
        let mut store = Self::new(catalog, storage, notifier, key);

        if let Some(json) = store.storage.get_item(&store.key).await? {
            store.cart = serde_json::from_str(&json)?;
            tracing::debug!(
                "Hydrated cart '{}' with {} products",
                store.key,
                store.cart.len()
            );
        } else {
            tracing::debug!("No stored cart under '{}', starting empty", store.key);
        }

        Ok(store)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Adds one unit of `product_id`, appending it to the cart if it is not there yet.
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<Cart> {
        let next = self.with_added(product_id).await;
        self.commit(next, Notice::AddFailed).await
    }

    pub async fn remove_product(&mut self, product_id: ProductId) -> Result<Cart> {
        let next = self.cart.without(product_id);
        self.commit(next, Notice::RemoveFailed).await
    }

    /// Sets the amount of a product already in the cart, bounded by its stock.
    pub async fn update_product_amount(&mut self, update: AmountUpdate) -> Result<Cart> {
        let next = self.with_updated(update).await;
        self.commit(next, Notice::UpdateFailed).await
    }

    async fn with_added(&self, product_id: ProductId) -> Result<Cart> {
        match self.cart.get(product_id) {
            None => {
                let product = self.catalog.product(product_id).await?;
                let stock = self.catalog.stock(product_id).await?;
                if stock.amount == 0 {
                    return Err(CartError::StockExhausted {
                        product_id,
                        requested: 1,
                        available: 0,
                    });
                }
                self.cart.with_item(LineItem::new(product, 1))
            }
            Some(item) => {
                let current = item.amount;
                let stock = self.catalog.stock(product_id).await?;
                if current >= stock.amount {
                    return Err(CartError::StockExhausted {
                        product_id,
                        requested: current.saturating_add(1),
                        available: stock.amount,
                    });
                }
                self.cart.with_amount(product_id, current + 1)
            }
        }
    }

    async fn with_updated(&self, update: AmountUpdate) -> Result<Cart> {
        let AmountUpdate { product_id, amount } = update;

        let requested = match u32::try_from(amount) {
            Ok(requested) if requested > 0 => requested,
            _ => return Err(CartError::InvalidAmount { product_id, amount }),
        };
        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart { product_id });
        }

        let stock = self.catalog.stock(product_id).await?;
        if requested > stock.amount {
            return Err(CartError::StockExhausted {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        self.cart.with_amount(product_id, requested)
    }

    async fn commit(&mut self, next: Result<Cart>, on_failure: Notice) -> Result<Cart> {
        let persisted = match next {
            Ok(cart) => self.persist(&cart).await.map(|()| cart),
            Err(err) => Err(err),
        };

        match persisted {
            Ok(cart) => {
                tracing::info!(
                    "Cart updated: {} products, {} units",
                    cart.len(),
                    cart.total_amount()
                );
                self.cart = cart.clone();
                Ok(cart)
            }
            Err(err) => {
                let notice = match &err {
                    CartError::StockExhausted { .. } => Notice::StockExhausted,
                    _ => on_failure,
                };
                tracing::warn!("{} ({})", notice, err);
                self.notifier.notify(notice);
                Err(err)
            }
        }
    }

    async fn persist(&self, cart: &Cart) -> Result<()> {
        let json = serde_json::to_string(cart)?;
        tracing::debug!("Writing cart ({} bytes) to '{}'", json.len(), self.key);
        self.storage.set_item(&self.key, &json).await
    }
}
