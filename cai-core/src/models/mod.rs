pub mod candidate;
pub mod confidence;
pub mod fused;
pub mod layer;
pub mod record;

pub use candidate::CandidateCategory;
pub use confidence::Confidence;
pub use fused::{FusedContext, TimeSpan};
pub use layer::{ContextLayer, LayerNode};
pub use record::{ContextRecord, Payload};
