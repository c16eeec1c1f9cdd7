//! Listers for `apps/v1` kinds

use std::sync::Arc;

use k8s_openapi::api::apps::v1::ControllerRevision;

use crate::lister::{Lister, NamespaceLister};
use crate::resource::GroupResource;
use crate::store::IndexedStore;

/// Lists ControllerRevisions across all namespaces
pub type ControllerRevisionLister = Lister<ControllerRevision>;

/// Lists and gets ControllerRevisions in one namespace
pub type ControllerRevisionNamespaceLister = NamespaceLister<ControllerRevision>;

/// Create a ControllerRevision lister over a shared store
pub fn controller_revision_lister(
    store: Arc<dyn IndexedStore<ControllerRevision>>,
) -> ControllerRevisionLister {
    Lister::new(store, GroupResource::new("apps", "controllerrevision"))
}
