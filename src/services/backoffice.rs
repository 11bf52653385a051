// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrator and seller dashboard endpoints.

use crate::error::Result;
use crate::services::session::SessionController;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct BackofficeService {
    session: Arc<SessionController>,
}

impl BackofficeService {
    pub fn new(session: Arc<SessionController>) -> Self {
        Self { session }
    }

    // --- Administrator ---

    /// Aggregate statistics (users per role, orders, sales).
    pub async fn admin_dashboard(&self) -> Result<Value> {
        self.session.get_json("admin/dashboard").await
    }

    pub async fn admin_users(&self) -> Result<Value> {
        self.session.get_json("admin/usuarios").await
    }

    pub async fn admin_delete_user(&self, user_id: u64) -> Result<()> {
        self.session
            .delete(&format!("admin/usuarios/{}", user_id))
            .await
    }

    pub async fn admin_products(&self) -> Result<Value> {
        self.session.get_json("admin/productos").await
    }

    pub async fn admin_delete_product(&self, product_id: u64) -> Result<()> {
        self.session
            .delete(&format!("admin/productos/{}", product_id))
            .await
    }

    pub async fn admin_orders(&self) -> Result<Value> {
        self.session.get_json("admin/ordenes").await
    }

    pub async fn admin_set_order_status(&self, order_id: u64, status: &str) -> Result<Value> {
        self.session
            .put_json(
                &format!("admin/ordenes/{}/estado", order_id),
                &json!({ "estado": status }),
            )
            .await
    }

    // --- Seller ---

    pub async fn seller_products(&self) -> Result<Value> {
        self.session.get_json("vendedor/productos").await
    }

    pub async fn seller_product(&self, product_id: u64) -> Result<Value> {
        self.session
            .get_json(&format!("vendedor/productos/{}", product_id))
            .await
    }

    /// Create a product, or update it when `product_id` is given.
    pub async fn seller_save_product(
        &self,
        product_id: Option<u64>,
        product: &Value,
    ) -> Result<Value> {
        match product_id {
            Some(id) => {
                self.session
                    .put_json(&format!("vendedor/productos/{}", id), product)
                    .await
            }
            None => self.session.post_json("vendedor/productos", product).await,
        }
    }

    pub async fn seller_delete_product(&self, product_id: u64) -> Result<()> {
        self.session
            .delete(&format!("vendedor/productos/{}", product_id))
            .await
    }
}
