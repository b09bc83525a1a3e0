//! # Dashboard State
//!
//! Observable containers for the two data sets the dashboard renders.
//!
//! - **[`container`]**: Generic [`StateContainer`] with supersession by generation token
//! - **[`collections`]**: [`CollectionsState`], listing plus hide overrides
//! - **[`investments`]**: [`InvestmentsState`], trade statistics
//! - **[`overrides`]**: [`OverrideStore`], the persisted hidden-slug sets

pub mod collections;
pub mod container;
pub mod investments;
pub mod overrides;

pub use collections::{CollectionList, CollectionsState};
pub use container::{PendingHandle, Settlement, StateContainer, Status, SubscriptionId, Update};
pub use investments::InvestmentsState;
pub use overrides::OverrideStore;
