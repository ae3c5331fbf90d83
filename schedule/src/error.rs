use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The cycle budget ran out with operations still pending.
    ///
    /// For an acyclic input graph this indicates a builder bug, not a
    /// property of the loop; the driver reacts by falling back to the
    /// static heuristic instead of aborting compilation.
    #[snafu(display("scheduling deadlock: {unscheduled} operations still pending at cycle {cycle}"))]
    SchedulingDeadlock { cycle: u32, unscheduled: usize },

    /// Scheduling was invoked on a graph with no operations.
    #[snafu(display("cannot schedule an empty operation graph"))]
    EmptyGraph,
}
