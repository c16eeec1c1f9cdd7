//! Cloud provider handle and its optional capabilities

use kcm_listers::SharedInformerFactory;

/// A constructed cloud provider plugin
///
/// Only what startup needs is modelled here. Optional capabilities are exposed
/// through accessor methods returning `None` by default, so callers probe them
/// without downcasting.
pub trait CloudProvider: Send + Sync {
    /// Name the provider was registered under
    fn provider_name(&self) -> &str;

    /// Whether the cluster carries a ClusterID tag the provider can attribute resources to
    ///
    /// May query the cloud; startup does not bound how long it takes.
    fn has_cluster_id(&self) -> bool;

    /// The provider's informer-consumer capability, if it has one
    fn informer_user(&self) -> Option<&dyn InformerUser> {
        None
    }
}

/// Capability of providers that read cluster state from the shared caches
pub trait InformerUser: Send + Sync {
    /// Hand the provider the shared informer factory
    ///
    /// Called at most once, during startup, before any controller runs.
    fn set_informers(&self, informers: SharedInformerFactory);
}
