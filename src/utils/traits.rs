use crate::utils::bags::{
    ProbeOutcome,
    WorkItem
};

/// Performs the network side of one work item. Implementations are shared by
/// every worker thread.
pub trait Prober: Sync + Send {
    fn probe(&self,item: &WorkItem) -> ProbeOutcome;
}
