use serde::{Deserialize, Serialize};

use crate::entity::rating;
use crate::services::NewRating;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RatingRequest {
    /// Score from 0 to 5.
    #[schema(example = 5)]
    pub rating: i32,
    #[schema(example = "Great with bread")]
    pub comment: Option<String>,
}

impl From<RatingRequest> for NewRating {
    fn from(req: RatingRequest) -> Self {
        Self {
            rating: req.rating,
            comment: req.comment,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    #[schema(example = 1)]
    pub rating_id: i32,
    #[schema(example = 5)]
    pub rating: i32,
    pub comment: Option<String>,
}

impl From<rating::Model> for RatingResponse {
    fn from(model: rating::Model) -> Self {
        Self {
            rating_id: model.id,
            rating: model.rating,
            comment: model.comment,
        }
    }
}
