//! Shopping cart model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: i32,
    pub user_id: String,
    pub movie_id: i32,
    pub price_at_addition: Decimal,
    pub added_at: DateTime<Utc>,
}

/// Cart item joined with its movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CartLine {
    pub id: i32,
    pub movie_id: i32,
    pub movie_title: String,
    pub release_year: i32,
    pub price: Decimal,
    pub added_at: DateTime<Utc>,
    pub genres: Vec<String>,
}

/// A user's cart with totals.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
    pub total_price: Decimal,
    pub total_items: usize,
}

impl Cart {
    pub fn new(items: Vec<CartLine>) -> Self {
        let total_price = items.iter().map(|line| line.price).sum();
        Self {
            total_items: items.len(),
            total_price,
            items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCart {
    pub movie_id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartCount {
    pub count: i64,
}

/// Result of clearing a cart.
#[derive(Debug, Clone, Serialize)]
pub struct ClearedCart {
    pub removed: u64,
}

/// Outcome of a (simulated) checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutReceipt {
    pub movie_count: i64,
    pub total_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn line(id: i32, price: &str) -> CartLine {
        CartLine {
            id,
            movie_id: id,
            movie_title: format!("Movie {id}"),
            release_year: 2000 + id,
            price: Decimal::from_str(price).unwrap(),
            added_at: Utc::now(),
            genres: vec!["Drama".to_string()],
        }
    }

    #[test]
    fn cart_totals() {
        let cart = Cart::new(vec![line(1, "3.99"), line(2, "4.50"), line(3, "0.51")]);
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_price, Decimal::from_str("9.00").unwrap());
    }

    #[test]
    fn empty_cart_totals() {
        let cart = Cart::new(Vec::new());
        assert_eq!(cart.total_items, 0);
        assert_eq!(cart.total_price, Decimal::ZERO);
    }
}
