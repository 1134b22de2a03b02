use smartstring::{LazyCompact, SmartString};

pub mod case_convention;
pub mod document;
pub mod selection;
pub mod textobject;
pub mod transaction;

pub type Tendril = SmartString<LazyCompact>;
