pub mod ascii;
pub mod batch;
pub mod bounds;
pub mod grid;
pub mod invoker;
pub mod script;

pub use ascii::{AxisLabels, post_process};
pub use batch::{BatchReport, Orchestrator, render_file};
pub use bounds::{BoundingBox, RowExtent, TickRows};
pub use grid::CharacterGrid;
pub use script::build_script;
