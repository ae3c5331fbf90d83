use snafu::Snafu;

use crate::types::InstId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// An operand must be produced by an earlier instruction.
    #[snafu(display("operand {operand} of {user} is not defined before use"))]
    OperandNotYetDefined { user: InstId, operand: InstId },

    /// Latch update attached to something that is not a header phi.
    #[snafu(display("{inst} is not a header phi and cannot carry a latch update"))]
    NotAHeaderPhi { inst: InstId },

    /// A header phi's latch update must be defined inside the loop.
    #[snafu(display("latch update {update} of header phi {phi} is out of range"))]
    UpdateOutOfRange { phi: InstId, update: InstId },
}
