//! # Wallet Dashboard - Library Root
//!
//! Asynchronous state core of a wallet dashboard: given an account address
//! (typed in, taken from the URL, or disclosed by a wallet) it fetches the
//! collections the account holds and its trading statistics, and keeps both
//! in observable containers that renderers subscribe to.
//!
//! ## Architecture
//!
//! ```text
//!  UserAction ──▶ SessionController ──┬──▶ CollectionsState ──▶ subscribers
//!  (async_channel)   │                │        ▲
//!                    │                │        └── OverrideStore (hidden slugs)
//!                    │                └──▶ InvestmentsState ──▶ subscribers
//!                    ▼
//!   WalletService / ConnectionSlot / History / DashboardView / Analytics
//! ```
//!
//! ## Module Structure
//!
//! - **app**: Composition root wiring production services together
//! - **core**: Errors, configuration, collaborator traits
//! - **state**: [`StateContainer`](state::StateContainer) and its two specializations
//! - **session**: Address resolution state machine, chain connection, user actions
//! - **services**: HTTP providers, JSON-RPC wallet, storage, history, analytics
//! - **ui**: Text renderers and the console view
//! - **debug**: Logging setup, trace ids, tracked task spawning
//! - **utils**: Query-string parsing
//!
//! ## Core Concepts
//!
//! ### Supersession
//!
//! Each container tags every pending fetch with a generation number. Only
//! the most recently issued fetch may change the value; anything older is
//! computed and thrown away. Switching addresses mid-flight therefore can
//! never show the previous address's data.
//!
//! ### Failure as State
//!
//! A fetch that fails or times out becomes an explicit
//! [`Update::Failed`](state::Update::Failed) notification. The container
//! stays usable and the next fetch is applied normally.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dashboard::app::Dashboard;
//! use dashboard::core::DashboardConfig;
//!
//! let config = DashboardConfig::load()?;
//! let dashboard = Dashboard::from_config(&config);
//! dashboard.collections.subscribe(|update| println!("{:?}", update));
//!
//! let outcome = dashboard.controller.start("?address=0x71C7656EC7ab88b098defB751B7401B5f6d8976F");
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p dashboard
//! cargo test -p dashboard session::tests
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod session;
pub mod state;
pub mod ui;
pub mod utils;

pub use app::Dashboard;
pub use self::core::{AppError, Result};
pub use session::{SessionController, SessionState, UserAction};
pub use state::{CollectionsState, InvestmentsState, StateContainer, Update};
