//! Products, line items and the cart itself.

use crate::cart::error::CartError;
use crate::cart::price::{round_amount, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

/// Something a shopper can put in the cart.
///
/// This is the payload of an add: a line item without a quantity. The name
/// is the item's identity inside the cart. Deserialization goes through
/// [`Product::with_price`], so an empty name is rejected there too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    name: String,
    cost: Price,
    #[serde(default)]
    image: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl Product {
    /// Build a product, parsing its cost.
    ///
    /// ```
    /// use cartflow::cart::{CartError, Product};
    ///
    /// let fern = Product::new("Boston Fern", "$18.00")?
    ///     .with_image("https://example.com/fern.jpg")
    ///     .with_attribute("description", "Removes formaldehyde");
    /// assert_eq!(fern.name(), "Boston Fern");
    ///
    /// assert!(matches!(
    ///     Product::new("Aloe", "cheap"),
    ///     Err(CartError::MalformedCost { .. })
    /// ));
    /// # Ok::<(), CartError>(())
    /// ```
    pub fn new(name: impl Into<String>, cost: &str) -> Result<Self, CartError> {
        Self::with_price(name, Price::parse(cost)?)
    }

    /// Build a product from an already parsed price.
    pub fn with_price(name: impl Into<String>, cost: Price) -> Result<Self, CartError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CartError::EmptyName);
        }
        Ok(Self {
            name,
            cost,
            image: String::new(),
            attributes: BTreeMap::new(),
        })
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> &Price {
        &self.cost
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

/// Wire shape of a [`Product`] before its invariants are checked.
#[derive(Deserialize)]
struct ProductRecord {
    name: String,
    cost: Price,
    #[serde(default)]
    image: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CartError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let mut product = Product::with_price(record.name, record.cost)?;
        product.image = record.image;
        product.attributes = record.attributes;
        Ok(product)
    }
}

/// A product in the cart together with how many of it were added.
///
/// The quantity is a [`NonZeroU32`]: a line whose quantity would drop to
/// zero is removed from the cart instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    product: Product,
    quantity: NonZeroU32,
}

impl CartLineItem {
    pub(crate) fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    pub fn name(&self) -> &str {
        self.product.name()
    }

    pub fn cost(&self) -> &Price {
        self.product.cost()
    }

    pub fn image(&self) -> &str {
        self.product.image()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        self.product.attributes()
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub(crate) fn quantity_nonzero(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Cost times quantity, rounded to cents.
    pub fn line_total(&self) -> Decimal {
        round_amount(self.unrounded_total())
    }

    pub(crate) fn unrounded_total(&self) -> Decimal {
        self.cost().times(self.quantity())
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

/// Ordered line items, unique by name, in the order they were first added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of cost × quantity over all lines, rounded to cents once at the
    /// end (not per line).
    pub fn total_amount(&self) -> Decimal {
        round_amount(self.items.iter().map(CartLineItem::unrounded_total).sum())
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    pub(crate) fn push(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    pub(crate) fn remove_at(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub(crate) fn retain_except(&mut self, name: &str) {
        self.items.retain(|item| item.name() != name);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
