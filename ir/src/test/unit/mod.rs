pub mod features;
pub mod legality;
