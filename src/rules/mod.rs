//! Rule policies for variant implementations.
//!
//! Variants implement `RulePolicy` to define:
//! - Deal shape and pile layout (through `VariantConfig`)
//! - Placement legality (`can_add`) and run joining (`can_join`)
//! - Deal and post-move hooks
//!
//! The `VariantRegistry` maps names to policies from an explicit list.

pub mod policy;
pub mod registry;

pub use policy::{deal_all, deal_pile, foundation_accepts, standard_can_add, tableau_accepts, RulePolicy};
pub use registry::{VariantFactory, VariantRegistry};
