/// Solved cell to variant mappings
pub mod assignment;
/// Residual flow network and transportation layout
pub mod network;
/// Target-to-mosaic orchestration
pub mod pipeline;
/// Reduced-cost shortest path search
pub mod shortest_path;
/// Min-cost flow transportation solver with progress and cancellation
pub mod transport;

pub use assignment::Assignment;
pub use transport::{CancellationToken, TransportationSolver};
