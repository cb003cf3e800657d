//! Built-in solitaire variants.
//!
//! Each variant is configuration plus a handful of hooks on `RulePolicy`:
//!
//! - `Klondike`: seven tableau piles, a stock turned onto a waste pile
//!   `deal_by` cards at a time, unlimited redeals
//! - `Yukon`: seven tableau piles dealt from the whole deck, no stock, any
//!   face-up group may be moved
//!
//! Both share the foundation and tableau legality in
//! `rules::standard_can_add`.

mod klondike;
mod yukon;

pub use klondike::Klondike;
pub use yukon::Yukon;
