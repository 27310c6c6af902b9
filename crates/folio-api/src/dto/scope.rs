use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use folio_types::{Resolution, Scope};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScopeDTO {
    pub scope: Scope,
    pub interval: String,
    pub minutes: i64,
    pub resolution: Resolution,
    /// Offered by the scope picker
    pub selectable: bool,
}

impl From<Scope> for ScopeDTO {
    fn from(scope: Scope) -> Self {
        Self {
            scope,
            interval: scope.interval().to_string(),
            minutes: scope.minutes(),
            resolution: scope.resolution(),
            selectable: scope.is_selectable(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetScopeRequest {
    pub scope: Scope,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentScopeDTO {
    pub scope: ScopeDTO,
    /// False when the scope was already selected
    pub changed: bool,
}
