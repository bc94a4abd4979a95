pub mod contact;
pub mod sat;

pub use contact::{ContactState, ContactTable, PairKey};
pub use sat::{
    Interval, MTV_TIE_TOLERANCE, MtvSelection, SatParams, SatResult, edge_normals, project, sat_test,
};
