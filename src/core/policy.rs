//! Centralized authorization predicates.
//!
//! Every mutating entry point calls one of these instead of testing profile
//! flags inline, so the capability rules live in one place.

use crate::entities::{outfit, profile};

/// Whether `profile` may list new outfits on the storefront.
///
/// Only the flagged seller account can create listings.
#[must_use]
pub fn can_create_outfit(profile: &profile::Model) -> bool {
    profile.is_seller
}

/// Whether `profile` may edit or deactivate `outfit`.
///
/// The flagged seller can manage everything; a designer can manage their
/// own listings.
#[must_use]
pub fn can_manage(profile: &profile::Model, outfit: &outfit::Model) -> bool {
    profile.is_seller || outfit.designer_id == Some(profile.id)
}

/// Whether `profile` may place an order.
///
/// Any authenticated profile can check out; the predicate exists so every
/// checkout path goes through the same gate.
#[must_use]
pub fn can_checkout(_profile: &profile::Model) -> bool {
    true
}
