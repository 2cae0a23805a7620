mod association_repo;
mod collection_repo;
mod component_repo;
mod organization_repo;
mod product_repo;
mod release_repo;

pub use association_repo::AssociationRepo;
pub use collection_repo::CollectionRepo;
pub use component_repo::ComponentRepo;
pub use organization_repo::OrganizationRepo;
pub use product_repo::ProductRepo;
pub use release_repo::ReleaseRepo;
