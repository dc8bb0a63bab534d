pub mod svn_repo;
pub mod test_repo;

pub use svn_repo::{SvnRepo, svn_available};
pub use test_repo::TestRepo;
