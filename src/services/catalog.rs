// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product and category catalog endpoints.
//!
//! Response shapes belong to the catalog views; they are passed through
//! as untyped JSON.

use crate::error::Result;
use crate::services::session::SessionController;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Catalog endpoints, called through the session controller.
#[derive(Clone)]
pub struct CatalogService {
    session: Arc<SessionController>,
}

impl CatalogService {
    pub fn new(session: Arc<SessionController>) -> Self {
        Self { session }
    }

    /// List products, filtered by `params` (e.g. `destacado`, `activo`, `page`).
    pub async fn products<Q: Serialize + ?Sized>(&self, params: &Q) -> Result<Value> {
        self.session.get_json_with_query("productos", params).await
    }

    pub async fn product(&self, id: u64) -> Result<Value> {
        self.session.get_json(&format!("productos/{}", id)).await
    }

    pub async fn products_by_category(&self, category_id: u64) -> Result<Value> {
        self.session
            .get_json(&format!("productos/categoria/{}", category_id))
            .await
    }

    pub async fn create_product(&self, product: &Value) -> Result<Value> {
        self.session.post_json("productos", product).await
    }

    pub async fn update_product(&self, id: u64, product: &Value) -> Result<Value> {
        self.session
            .put_json(&format!("productos/{}", id), product)
            .await
    }

    pub async fn delete_product(&self, id: u64) -> Result<()> {
        self.session.delete(&format!("productos/{}", id)).await
    }

    pub async fn categories(&self) -> Result<Value> {
        self.session.get_json("categorias").await
    }

    /// Top-level categories only.
    pub async fn main_categories(&self) -> Result<Value> {
        self.session.get_json("categorias/principales").await
    }

    pub async fn category(&self, id: u64) -> Result<Value> {
        self.session.get_json(&format!("categorias/{}", id)).await
    }

    pub async fn subcategories(&self, category_id: u64) -> Result<Value> {
        self.session
            .get_json(&format!("categorias/{}/subcategorias", category_id))
            .await
    }
}
