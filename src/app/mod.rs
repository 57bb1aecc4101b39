// Application layer - Use case interactors

pub mod container;
pub mod extract_interactor;
pub mod inspect_interactor;
pub mod pipeline_interactor;
pub mod resolve_interactor;
pub mod retention_interactor;
pub mod scan_interactor;
pub mod segment_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use extract_interactor::ExtractInteractor;
pub use inspect_interactor::{InspectInteractor, InspectReport};
pub use pipeline_interactor::{PipelineInteractor, RunReport};
pub use resolve_interactor::ResolveInteractor;
pub use retention_interactor::RetentionInteractor;
pub use scan_interactor::ScanInteractor;
pub use segment_interactor::SegmentInteractor;
