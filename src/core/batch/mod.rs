//! Batch request orchestration
//!
//! A batch is an ordered list of synthetic sub-requests run one after the
//! other through the regular REST dispatcher. Later sub-requests may refer to
//! earlier responses with `$(N.field)`; in atomic mode all of them share one
//! transaction and the first failure skips the rest and rolls back.

mod aggregator;
mod envelope;
mod orchestrator;
mod placeholder;
mod traits;
mod types;


pub use aggregator::{MULTI_STATUS, aggregate};
pub use envelope::{envelope_rules, parse_submission};
pub use orchestrator::{BatchOrchestrator, dispatched_entry, join_path, parent_path, skipped_entry};
pub use placeholder::{resolve_body, resolve_path};
pub use traits::{ErrorTranslator, JsonErrorTranslator, RequestDispatcher, TransactionalResource};
pub use types::{
    BatchMethod, BatchOutcome, BatchRequestSpec, BatchState, BatchSubmission, SubResponse,
};
