// Application layer - Use case interactors

pub mod container;
pub mod describe_interactor;
pub mod folder_interactor;
pub mod organize_interactor;
pub mod stitch_interactor;

// Re-export interactors
pub use describe_interactor::DescribeInteractor;
pub use folder_interactor::FolderInteractor;
pub use organize_interactor::{OrganizeInteractor, OrganizeReport};
pub use stitch_interactor::StitchInteractor;
