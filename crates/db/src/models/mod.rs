pub mod association;
pub mod collection;
pub mod component;
pub mod organization;
pub mod product;
pub mod release;
