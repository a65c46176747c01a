//! Core business logic for Hydra.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain rules for the point-of-sale live here.
//!
//! # Modules
//!
//! - `cart` - Cart line validation and total calculation
//! - `numbering` - Sequential, zero-padded sale numbers
//! - `status` - Sale and receivable status machines
//! - `payment` - Payment methods and receivable qualification
//! - `auth` - Password hashing

pub mod auth;
pub mod cart;
pub mod numbering;
pub mod payment;
pub mod status;

#[cfg(test)]
mod cart_props;
#[cfg(test)]
mod status_props;

pub use cart::{CartError, CartItem, compute_total, validate_cart};
pub use numbering::{SALE_NUMBER_WIDTH, format_sale_number, next_sale_number, parse_sale_number};
pub use payment::{CustomerType, PaymentMethod, requires_receivable, stock_check_required};
pub use status::{
    ReceivableStatus, SaleStatus, StatusError, ensure_cancellable, ensure_editable,
    ensure_settleable,
};
