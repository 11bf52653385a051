// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route table of the storefront application.
//!
//! Maps a requested path to the access it requires, or to a fallback
//! redirect. Patterns are matched segment by segment: literal segments,
//! `:param` placeholders, and a trailing `*` that matches any remainder
//! (including nothing). The first matching entry wins.

use crate::models::Role;

/// Access requirement of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    /// Signed in with one of these roles.
    Roles(Vec<Role>),
}

impl Access {
    pub fn required_roles(&self) -> &[Role] {
        match self {
            Access::Roles(roles) => roles,
            Access::Public | Access::Authenticated => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Page(Access),
    Redirect(String),
}

#[derive(Debug, Clone)]
struct RouteEntry {
    pattern: String,
    target: Target,
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Matched(&'a Access),
    Fallback(&'a str),
}

/// Ordered route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, pattern: &str, access: Access) -> Self {
        self.entries.push(RouteEntry {
            pattern: pattern.to_string(),
            target: Target::Page(access),
        });
        self
    }

    pub fn redirect(mut self, pattern: &str, to: &str) -> Self {
        self.entries.push(RouteEntry {
            pattern: pattern.to_string(),
            target: Target::Redirect(to.to_string()),
        });
        self
    }

    /// Resolve a requested path. `None` only when nothing matches,
    /// which cannot happen for tables ending in a `*` redirect.
    pub fn resolve(&self, path: &str) -> Option<Resolution<'_>> {
        let path = strip_query(path);
        self.entries
            .iter()
            .find(|entry| pattern_matches(&entry.pattern, path))
            .map(|entry| match &entry.target {
                Target::Page(access) => Resolution::Matched(access),
                Target::Redirect(to) => Resolution::Fallback(to.as_str()),
            })
    }

    /// The storefront's public pages and seller/admin dashboard.
    pub fn storefront() -> Self {
        use Access::{Authenticated, Public};

        Self::new()
            .page("/", Public)
            .page("/login", Public)
            .page("/register", Public)
            .page("/forgot-password", Public)
            .page("/reset-password", Public)
            .page("/forbidden", Public)
            // Catalog
            .page("/categorias", Public)
            .page("/categorias/:slug", Public)
            .page("/productos", Public)
            .page("/productos/categoria/:categoriaSlug", Public)
            .page("/productos/:slug", Public)
            .page("/tendencias", Public)
            .page("/nuevos", Public)
            .page("/destacados", Public)
            .page("/buscar", Public)
            .page("/buscar/:query", Public)
            .page("/vendedor/:vendedorSlug", Public)
            .page("/tienda/:vendedorSlug", Public)
            // Informational
            .page("/contact", Public)
            .page("/terms", Public)
            .page("/privacy", Public)
            .page("/about", Public)
            .page("/blog", Public)
            .page("/health", Public)
            .page("/api-docs", Public)
            .page("/error500", Public)
            // Dashboard
            .page("/dashboard", Authenticated)
            .page("/dashboard/profile", Authenticated)
            .page("/dashboard/products", Authenticated)
            .page("/dashboard/products/:id", Authenticated)
            .page("/dashboard/cart", Access::Roles(vec![Role::Comprador]))
            .page("/dashboard/checkout", Access::Roles(vec![Role::Comprador]))
            .page("/dashboard/mis-productos/*", Access::Roles(vec![Role::Vendedor]))
            .page("/dashboard/admin/*", Access::Roles(vec![Role::Administrador]))
            .redirect("/dashboard/*", "/dashboard")
            .redirect("*", "/")
    }
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pattern = segments(pattern);
    let mut path = segments(path);

    loop {
        match (pattern.next(), path.next()) {
            (Some("*"), _) => return true,
            (Some(p), Some(_)) if p.starts_with(':') => continue,
            (Some(p), Some(s)) if p == s => continue,
            (None, None) => return true,
            _ => return false,
        }
    }
}
