//! Static rule data: in-memory tables, TOML loading, built-in prestige classes.

pub mod prestige;
pub mod static_data;

pub use prestige::prestige_classes;
pub use static_data::StaticRuleData;
