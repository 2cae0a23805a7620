pub mod collection;
pub mod component;
pub mod product;
pub mod release;
