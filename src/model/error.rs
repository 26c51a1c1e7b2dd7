//! Error taxonomy of the simulation core.

use petri_data::{BacteriumId, FoodId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// The direction vector toward a food target has no usable length. The
    /// agent-on-center case is absorbed by the arrival check (a coincident
    /// agent is inside the radius), so reaching this means the coordinates
    /// are corrupt.
    #[error("bacterium {bacterium:?} has no finite direction toward food {food:?}")]
    DegenerateGeometry {
        bacterium: BacteriumId,
        food: FoodId,
    },

    /// Aggregating statistics over zero survivors.
    #[error("no survivors to aggregate statistics over")]
    EmptyPopulationStatistics,

    /// An agent's meal reference points at a food that is no longer live.
    #[error("bacterium {bacterium:?} references food {food:?} which is not in the live set")]
    InconsistentFoodReference {
        bacterium: BacteriumId,
        food: FoodId,
    },
}
