pub mod rbac_repo;
pub use rbac_repo::{PermissionStore, RbacRepository};
pub mod tenancy_repo;
pub use tenancy_repo::{TenantRepository, TenantStore};
