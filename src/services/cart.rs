//! Shopping cart service. Carts are keyed by the identity-provider subject.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::cart::{Cart, CartCount, CartItem, CartLine, CheckoutReceipt, ClearedCart};
use crate::services::movie as movie_service;

/// The user's cart, newest additions first.
pub async fn get(pool: &PgPool, user_id: &str) -> Result<Cart, AppError> {
    let items = sqlx::query_as::<_, CartLine>(
        r#"
        SELECT ci.id, ci.movie_id, m.title AS movie_title, m.release_year,
               ci.price_at_addition AS price, ci.added_at,
               COALESCE((SELECT array_agg(g.name::text ORDER BY g.name)
                         FROM movie_genres mg JOIN genres g ON g.id = mg.genre_id
                         WHERE mg.movie_id = m.id), ARRAY[]::text[]) AS genres
        FROM cart_items ci
        JOIN movies m ON m.id = ci.movie_id
        WHERE ci.user_id = $1
        ORDER BY ci.added_at DESC, ci.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(Cart::new(items))
}

pub async fn count(pool: &PgPool, user_id: &str) -> Result<CartCount, AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(CartCount { count })
}

/// Add a movie at its current rental price.
pub async fn add(pool: &PgPool, user_id: &str, movie_id: i32) -> Result<CartItem, AppError> {
    let movie = movie_service::find_by_id(pool, movie_id).await?;

    let item = sqlx::query_as::<_, CartItem>(
        r#"
        INSERT INTO cart_items (user_id, movie_id, price_at_addition)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(movie.rental_price)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "This movie is already in your cart"))?;

    tracing::info!(user_id, movie_id, price = %item.price_at_addition, "Added to cart");
    Ok(item)
}

/// Remove one of the user's own cart items.
pub async fn remove(pool: &PgPool, user_id: &str, item_id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cart item {item_id} not found")));
    }
    Ok(())
}

pub async fn clear(pool: &PgPool, user_id: &str) -> Result<ClearedCart, AppError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(ClearedCart {
        removed: result.rows_affected(),
    })
}

/// Simulated checkout: total the cart and empty it in one transaction.
pub async fn checkout(pool: &PgPool, user_id: &str) -> Result<CheckoutReceipt, AppError> {
    let mut tx = pool.begin().await?;

    let (movie_count, total_amount) = sqlx::query_as::<_, (i64, Option<Decimal>)>(
        "SELECT COUNT(*), SUM(price_at_addition) FROM cart_items WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    if movie_count == 0 {
        return Err(AppError::Validation("Your cart is empty".to_string()));
    }

    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let receipt = CheckoutReceipt {
        movie_count,
        total_amount: total_amount.unwrap_or(Decimal::ZERO),
    };
    tracing::info!(user_id, movie_count, total = %receipt.total_amount, "Checkout completed");
    Ok(receipt)
}
