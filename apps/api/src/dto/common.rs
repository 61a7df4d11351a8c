mod parsing;
mod types;

pub use parsing::{
    parse_date, parse_optional_record_id, parse_optional_timestamp, parse_optional_user_id,
    parse_timestamp,
};
pub use types::HealthResponse;
