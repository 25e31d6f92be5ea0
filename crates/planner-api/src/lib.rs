//! HTTP client for the Plot Planner backend.
//!
//! [`PlannerClient`] wraps the backend's JSON and form routes: cell symbols,
//! plant lists, connections between projects, plots and plant lists, and
//! the plant catalog proxy. It implements
//! [`PersistenceApi`](planner_grid::PersistenceApi), so a
//! [`PlotDesign`](planner_grid::PlotDesign) can paint straight through it.
//!
//! # Example
//!
//! ```no_run
//! use planner_api::{ClientSettings, PlannerClient};
//! use planner_grid::{NullRenderer, PlotDesign};
//! use planner_model::{GridDims, PlotId};
//!
//! async fn load_plot() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlannerClient::new(ClientSettings::load(None)?)?;
//!     let mut design = PlotDesign::new(PlotId(1), GridDims::new(4, 6), NullRenderer);
//!     design.refresh(&client).await?;
//!     println!("{} cells painted", design.grid().assigned_count());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::PlannerClient;
pub use config::ClientSettings;
pub use error::{ApiError, Result};
