//! Chart-side algorithms of the folio pipeline.
//!
//! Everything here is synchronous and pure: a flat record set goes in, an
//! ordered value series, its gap segments, scales and readouts come out.

pub mod bucket;
pub mod crosshair;
pub mod gaps;
pub mod scale;
pub mod summary;
pub mod view;

pub use bucket::{DisplayPolicy, bucket_records, bucket_values};
pub use crosshair::{Crosshair, locate, locate_at_pixel};
pub use gaps::{GapFixed, fix_gaps};
pub use scale::{MARGIN_BOTTOM, MARGIN_TOP, TimeScale, ValueBounds, ValueScale};
pub use summary::{
    Delta, Direction, Holding, calculate_delta, focused_holdings, focused_value, format_delta,
};
pub use view::{ChartView, NO_DATA};
